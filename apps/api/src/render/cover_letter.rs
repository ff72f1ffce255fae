//! Cover-letter layout: date line, then one wrapped block per paragraph.

use chrono::NaiveDate;

use crate::layout::{paginate, Align, Block, FontFamily, FontStyle, PageGeometry, TextStyle};
use crate::models::documents::{GeneratedCoverLetter, GeneratedResume};
use crate::render::pdf::write_pdf;
use crate::render::resume::{resume_blocks, RESUME_MARGIN_IN};
use crate::render::RenderError;

pub const COVER_LETTER_MARGIN_IN: f32 = 1.0;
const PARAGRAPH_GAP: f32 = 8.0;

const LETTER_STYLE: TextStyle = TextStyle {
    family: FontFamily::Helvetica,
    style: FontStyle::Regular,
    size: 11.0,
    color: [0.0, 0.0, 0.0],
};

/// Splits on blank lines; newlines inside a paragraph become spaces.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    normalized
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.replace('\n', " "))
        .collect()
}

pub fn cover_letter_blocks(letter: &GeneratedCoverLetter, date: NaiveDate) -> Vec<Block> {
    let mut blocks = vec![
        Block::Paragraph {
            text: date.format("%B %d, %Y").to_string(),
            style: LETTER_STYLE,
            align: Align::Left,
            space_before: 0.0,
            keep_with_next: 0.0,
        },
        Block::Spacer(14.0),
    ];
    for paragraph in split_paragraphs(&letter.content) {
        blocks.push(Block::Paragraph {
            text: paragraph,
            style: LETTER_STYLE,
            align: Align::Left,
            space_before: 0.0,
            keep_with_next: 0.0,
        });
        blocks.push(Block::Spacer(PARAGRAPH_GAP));
    }
    blocks
}

pub fn render_cover_letter_pdf(
    letter: &GeneratedCoverLetter,
    date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let geometry = PageGeometry::letter(COVER_LETTER_MARGIN_IN);
    let pages = paginate(&cover_letter_blocks(letter, date), &geometry);
    let title = format!(
        "Cover Letter - {} at {}",
        letter.job_info.job_title, letter.job_info.company_name
    );
    write_pdf(&pages, &geometry, &title)
}

/// Cover letter, page break, resume, in one document with resume margins.
pub fn render_portfolio_pdf(
    letter: &GeneratedCoverLetter,
    resume: &GeneratedResume,
    date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let geometry = PageGeometry::letter(RESUME_MARGIN_IN);
    let mut blocks = cover_letter_blocks(letter, date);
    blocks.push(Block::PageBreak);
    blocks.extend(resume_blocks(resume));
    let pages = paginate(&blocks, &geometry);
    let title = format!("Application - {}", resume.personal_info.full_name());
    write_pdf(&pages, &geometry, &title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::generation::tone::Tone;
    use crate::models::documents::{JobInfo, OrganizedSkills};
    use crate::models::profile::PersonalInfo;
    use crate::render::plain_text;
    use crate::templates::TemplateName;

    fn letter(content: &str) -> GeneratedCoverLetter {
        GeneratedCoverLetter {
            content: content.to_string(),
            job_info: JobInfo {
                company_name: "Umbrella".to_string(),
                job_title: "Analyst".to_string(),
                hiring_manager: None,
                company_info: None,
                job_description: "Analyze".to_string(),
                tone: Tone::Conservative,
            },
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_split_paragraphs_joins_internal_newlines() {
        let paragraphs = split_paragraphs("Dear team,\n\nI am\nexcited.\r\n\r\n\n\nRegards,\nSam");
        assert_eq!(paragraphs, vec!["Dear team,", "I am excited.", "Regards, Sam"]);
    }

    #[test]
    fn test_date_comes_first() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        let text = plain_text(&cover_letter_blocks(&letter("Dear team,\n\nHello."), date));
        assert!(text.starts_with("July 04, 2025"));
        assert!(text.ends_with("Hello."));
    }

    #[test]
    fn test_render_produces_pdf() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let bytes = render_cover_letter_pdf(&letter("Dear team,\n\nHello."), date).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_portfolio_puts_resume_on_a_new_page() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let resume = GeneratedResume {
            personal_info: PersonalInfo {
                first_name: "Sam".to_string(),
                last_name: "Lee".to_string(),
                ..PersonalInfo::default()
            },
            professional_summary: "Summary".to_string(),
            work_experience: vec![],
            education: vec![],
            skills: OrganizedSkills::default(),
            template: TemplateName::Executive,
            generated_at: Utc::now(),
        };
        let bytes = render_portfolio_pdf(&letter("Dear team,"), &resume, date).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }
}
