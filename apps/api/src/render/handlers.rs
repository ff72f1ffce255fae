//! Axum route handlers for document downloads and the ATS check.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::ats::{check_ats_compatibility, AtsReport};
use crate::render::cover_letter::{render_cover_letter_pdf, render_portfolio_pdf};
use crate::render::resume::{render_resume_pdf, resume_blocks};
use crate::render::{document_filename, plain_text, render_blocking};
use crate::state::AppState;
use crate::templates::recommendations::{check_against_template, TemplateCheck};

/// A finished PDF plus the name offered to the browser.
pub struct PdfDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl IntoResponse for PdfDocument {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", self.filename),
                ),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct AtsCheckResponse {
    pub report: AtsReport,
    pub template_check: TemplateCheck,
    pub text: String,
}

/// GET /api/v1/sessions/:id/resume/pdf
pub async fn handle_resume_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<PdfDocument, AppError> {
    let resume = {
        let handle = state.sessions.get(id).await?;
        let session = handle.lock().await;
        session
            .resume
            .clone()
            .ok_or_else(|| AppError::NotFound("No resume has been generated yet".to_string()))?
    };
    let filename = document_filename("resume", &resume.personal_info, Utc::now().date_naive());
    let bytes = render_blocking(move || render_resume_pdf(&resume)).await?;
    Ok(PdfDocument { filename, bytes })
}

/// GET /api/v1/sessions/:id/cover-letter/pdf
pub async fn handle_cover_letter_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<PdfDocument, AppError> {
    let (letter, info) = {
        let handle = state.sessions.get(id).await?;
        let session = handle.lock().await;
        let letter = session.cover_letter.clone().ok_or_else(|| {
            AppError::NotFound("No cover letter has been generated yet".to_string())
        })?;
        (letter, session.profile.personal_info.clone())
    };
    let today = Utc::now().date_naive();
    let filename = document_filename("cover_letter", &info, today);
    let bytes = render_blocking(move || render_cover_letter_pdf(&letter, today)).await?;
    Ok(PdfDocument { filename, bytes })
}

/// GET /api/v1/sessions/:id/portfolio/pdf
///
/// Cover letter followed by the resume in one file. Needs both.
pub async fn handle_portfolio_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<PdfDocument, AppError> {
    let (letter, resume) = {
        let handle = state.sessions.get(id).await?;
        let session = handle.lock().await;
        match (&session.cover_letter, &session.resume) {
            (Some(letter), Some(resume)) => (letter.clone(), resume.clone()),
            _ => {
                return Err(AppError::NotFound(
                    "Generate both a resume and a cover letter first".to_string(),
                ))
            }
        }
    };
    let today = Utc::now().date_naive();
    let filename = document_filename("portfolio", &resume.personal_info, today);
    let bytes = render_blocking(move || render_portfolio_pdf(&letter, &resume, today)).await?;
    Ok(PdfDocument { filename, bytes })
}

/// GET /api/v1/sessions/:id/resume/ats
///
/// Runs the ATS heuristics over the resume's plain text and compares it
/// with its template's section list.
pub async fn handle_resume_ats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsCheckResponse>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    let resume = session
        .resume
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No resume has been generated yet".to_string()))?;

    let text = plain_text(&resume_blocks(resume));
    Ok(Json(AtsCheckResponse {
        report: check_ats_compatibility(&text),
        template_check: check_against_template(resume),
        text,
    }))
}
