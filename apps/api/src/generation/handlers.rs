//! Axum route handlers for the Generation API.
//!
//! Each handler snapshots the session profile, releases the session lock for
//! the duration of the service calls, then stores the finished artifact in a
//! single assignment. A failed call leaves the previous artifact in place.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{
    analyze_job_match, customize_for_industry, generate_cover_letter, generate_resume,
    suggest_improvements,
};
use crate::generation::outcome::Degradable;
use crate::models::documents::{GeneratedCoverLetter, GeneratedResume, JobInfo, JobMatchAnalysis};
use crate::models::profile::CareerProfile;
use crate::state::AppState;
use crate::templates::TemplateName;
use crate::validation::validate_personal_info;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GenerateResumeRequest {
    /// Template name; unknown or missing names use Professional.
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomizeRequest {
    pub industry: String,
}

#[derive(Debug, Serialize)]
pub struct CustomizeResponse {
    pub industry: String,
    pub outcome: Degradable<String>,
    /// False when nothing was stored: the result degraded, or the letter was
    /// replaced while the call was running.
    pub stored: bool,
}

/// An empty body means "all defaults"; anything else must parse.
fn parse_optional_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Generation needs at least a valid personal info form.
fn require_personal_info(profile: &CareerProfile) -> Result<(), AppError> {
    if validate_personal_info(&profile.personal_info).is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Please complete your personal information first".to_string(),
        ))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/resume
///
/// Generates the summary (unless the user wrote one) and enhances every
/// experience entry. Enhancement failures degrade per entry; a summary
/// failure fails the request and keeps any earlier resume.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<GeneratedResume>, AppError> {
    let request: GenerateResumeRequest = parse_optional_body(&body)?;
    let template = request
        .template
        .as_deref()
        .map(TemplateName::from_name)
        .unwrap_or_default();

    let profile = state.sessions.profile(id).await?;
    require_personal_info(&profile)?;

    let resume = generate_resume(state.generator.as_ref(), &profile, template).await?;

    let handle = state.sessions.get(id).await?;
    handle.lock().await.resume = Some(resume.clone());
    Ok(Json(resume))
}

/// POST /api/v1/sessions/:id/resume/suggestions
pub async fn handle_resume_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<Degradable<Vec<String>>>, AppError> {
    require_text(&request.job_description, "job_description")?;
    let resume = {
        let handle = state.sessions.get(id).await?;
        let session = handle.lock().await;
        session
            .resume
            .clone()
            .ok_or_else(|| AppError::NotFound("No resume has been generated yet".to_string()))?
    };

    let outcome =
        suggest_improvements(state.generator.as_ref(), &resume, &request.job_description).await;
    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(job): Json<JobInfo>,
) -> Result<Json<GeneratedCoverLetter>, AppError> {
    require_text(&job.company_name, "company_name")?;
    require_text(&job.job_title, "job_title")?;
    require_text(&job.job_description, "job_description")?;

    let profile = state.sessions.profile(id).await?;
    require_personal_info(&profile)?;

    let letter = generate_cover_letter(state.generator.as_ref(), &profile, job).await?;

    let handle = state.sessions.get(id).await?;
    handle.lock().await.cover_letter = Some(letter.clone());
    Ok(Json(letter))
}

/// POST /api/v1/sessions/:id/cover-letter/customize
///
/// A customized letter replaces the stored one; a degraded result leaves it as is.
/// If the stored letter changed during the call, the newer letter is kept.
pub async fn handle_customize_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CustomizeRequest>,
) -> Result<Json<CustomizeResponse>, AppError> {
    require_text(&request.industry, "industry")?;
    let handle = state.sessions.get(id).await?;
    let letter = handle
        .lock()
        .await
        .cover_letter
        .clone()
        .ok_or_else(|| AppError::NotFound("No cover letter has been generated yet".to_string()))?;

    let outcome =
        customize_for_industry(state.generator.as_ref(), &letter.content, &request.industry).await;

    let mut stored = false;
    if let Degradable::Generated { value } = &outcome {
        let mut session = handle.lock().await;
        let unchanged = session.cover_letter.as_ref().is_some_and(|current| {
            current.generated_at == letter.generated_at && current.content == letter.content
        });
        if unchanged {
            session.cover_letter = Some(GeneratedCoverLetter {
                content: value.clone(),
                ..letter
            });
            stored = true;
        } else {
            info!("Cover letter in session {id} changed during customization; keeping it");
        }
    }

    Ok(Json(CustomizeResponse {
        industry: request.industry,
        outcome,
        stored,
    }))
}

/// POST /api/v1/sessions/:id/job-match
pub async fn handle_job_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<Degradable<JobMatchAnalysis>>, AppError> {
    require_text(&request.job_description, "job_description")?;
    let profile = state.sessions.profile(id).await?;
    let outcome =
        analyze_job_match(state.generator.as_ref(), &profile, &request.job_description).await;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use tokio::sync::Notify;

    use super::*;
    use crate::config::Config;
    use crate::generation::tone::Tone;
    use crate::llm_client::{GenerationRequest, LlmError, TextGenerator};
    use crate::session::SessionStore;

    /// Signals when a call starts, then holds it until released.
    struct GatedGenerator {
        entered: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String, LlmError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("CUSTOMIZED".to_string())
        }
    }

    fn letter(content: &str, generated_at: chrono::DateTime<Utc>) -> GeneratedCoverLetter {
        GeneratedCoverLetter {
            content: content.to_string(),
            job_info: JobInfo {
                company_name: "Initech".to_string(),
                job_title: "Engineer".to_string(),
                hiring_manager: None,
                company_info: None,
                job_description: "Build".to_string(),
                tone: Tone::Professional,
            },
            generated_at,
        }
    }

    fn state(generator: Arc<dyn TextGenerator>) -> AppState {
        AppState {
            sessions: SessionStore::default(),
            generator,
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_model: "test-model".to_string(),
                llm_timeout_secs: 5,
                port: 0,
                rust_log: "debug".to_string(),
            },
        }
    }

    fn gated() -> (Arc<Notify>, Arc<Notify>, AppState) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let generator = GatedGenerator {
            entered: entered.clone(),
            release: release.clone(),
        };
        (entered, release, state(Arc::new(generator)))
    }

    async fn stored_content(state: &AppState, id: Uuid) -> String {
        let handle = state.sessions.get(id).await.unwrap();
        let session = handle.lock().await;
        session.cover_letter.as_ref().unwrap().content.clone()
    }

    #[tokio::test]
    async fn test_customization_stores_result_when_letter_unchanged() {
        let (entered, release, state) = gated();
        let id = state.sessions.create().await;
        let handle = state.sessions.get(id).await.unwrap();
        handle.lock().await.cover_letter = Some(letter("OLD LETTER", Utc::now()));

        release.notify_one();
        let Json(response) = handle_customize_cover_letter(
            State(state.clone()),
            Path(id),
            Json(CustomizeRequest {
                industry: "Finance".to_string(),
            }),
        )
        .await
        .unwrap();
        entered.notified().await;

        assert!(response.stored);
        assert_eq!(stored_content(&state, id).await, "CUSTOMIZED");
    }

    #[tokio::test]
    async fn test_letter_replaced_during_customization_is_kept() {
        let (entered, release, state) = gated();
        let id = state.sessions.create().await;
        let handle = state.sessions.get(id).await.unwrap();
        let first = Utc::now();
        handle.lock().await.cover_letter = Some(letter("OLD LETTER", first));

        let task = tokio::spawn(handle_customize_cover_letter(
            State(state.clone()),
            Path(id),
            Json(CustomizeRequest {
                industry: "Finance".to_string(),
            }),
        ));

        entered.notified().await;
        handle.lock().await.cover_letter =
            Some(letter("NEW LETTER", first + Duration::seconds(1)));
        release.notify_one();

        let Json(response) = task.await.unwrap().unwrap();
        assert!(!response.stored);
        assert!(!response.outcome.is_degraded());
        assert_eq!(stored_content(&state, id).await, "NEW LETTER");
    }

    #[test]
    fn test_empty_body_uses_defaults() {
        let request: GenerateResumeRequest =
            parse_optional_body(&Bytes::from_static(b"  ")).unwrap();
        assert!(request.template.is_none());
    }

    #[test]
    fn test_malformed_body_is_rejected() {
        let result: Result<GenerateResumeRequest, _> =
            parse_optional_body(&Bytes::from_static(br#"{"template": 5}"#));
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
