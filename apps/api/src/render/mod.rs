// Document Renderer: generated content → layout blocks → PDF bytes.
// Every document is built fully in memory; callers get all of it or an error.

pub mod cover_letter;
pub mod handlers;
pub mod pdf;
pub mod resume;

use chrono::NaiveDate;
use thiserror::Error;

use crate::errors::AppError;
use crate::layout::Block;
use crate::models::profile::PersonalInfo;
use crate::validation::sanitize_filename;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e.to_string())
    }
}

/// Runs a CPU-bound render on the blocking pool.
pub async fn render_blocking<F>(render: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce() -> Result<Vec<u8>, RenderError> + Send + 'static,
{
    let bytes = tokio::task::spawn_blocking(render)
        .await
        .map_err(|e| RenderError::Task(e.to_string()))??;
    Ok(bytes)
}

/// `<document-type>_<first-name>_<YYYYMMDD>.pdf`, safe for a Content-Disposition header.
pub fn document_filename(document_type: &str, info: &PersonalInfo, date: NaiveDate) -> String {
    let first_name = match info.first_name.trim() {
        "" => "user",
        name => name,
    };
    sanitize_filename(&format!(
        "{document_type}_{first_name}_{}.pdf",
        date.format("%Y%m%d")
    ))
}

/// The document's text in reading order, one line per block. Bullets are
/// written with a `- ` marker.
pub fn plain_text(blocks: &[Block]) -> String {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Paragraph { text, .. } => lines.push(text.trim().to_string()),
            Block::Bullet { text, .. } => lines.push(format!("- {}", text.trim())),
            Block::Spacer(_) | Block::PageBreak => {
                if lines.last().is_some_and(|l: &String| !l.is_empty()) {
                    lines.push(String::new());
                }
            }
            Block::Rule { .. } => {}
        }
    }
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(first: &str) -> PersonalInfo {
        PersonalInfo {
            first_name: first.to_string(),
            ..PersonalInfo::default()
        }
    }

    #[test]
    fn test_filename_pattern() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            document_filename("resume", &info("Jane"), date),
            "resume_Jane_20240309.pdf"
        );
    }

    #[test]
    fn test_filename_defaults_and_sanitizes_first_name() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(
            document_filename("cover_letter", &info("  "), date),
            "cover_letter_user_20241231.pdf"
        );
        assert_eq!(
            document_filename("resume", &info("Mary Ann/\"Q\""), date),
            "resume_Mary_AnnQ_20241231.pdf"
        );
    }

    #[tokio::test]
    async fn test_render_failure_maps_to_generic_error() {
        let result = render_blocking(|| Err(RenderError::Task("boom".to_string()))).await;
        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Render(_)));
    }
}
