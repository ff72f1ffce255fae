//! Axum route handlers for the profile forms and data interchange.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::insights::experience::{experience_duration, experience_level, ExperienceLevel};
use crate::models::profile::{
    CareerProfile, EducationEntry, PersonalInfo, SkillCategory, SkillEntry, WorkExperience,
};
use crate::session::interchange::{export_json, import_json};
use crate::session::Session;
use crate::state::AppState;
use crate::templates::recommendations::{customize_for_experience_level, LevelCustomization};
use crate::validation::{
    normalize_personal_info, sanitize_filename, validate_education, validate_personal_info,
    validate_work_experience, FieldError,
};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
}

/// The skills form: one comma-separated list per category.
#[derive(Debug, Default, Deserialize)]
pub struct SkillsForm {
    #[serde(default)]
    pub technical: String,
    #[serde(default)]
    pub soft: String,
    #[serde(default)]
    pub languages: String,
    #[serde(default)]
    pub certifications: String,
}

impl SkillsForm {
    /// Flattens the form into entries, dropping blank items.
    pub fn into_entries(self) -> Vec<SkillEntry> {
        [
            (self.technical, SkillCategory::Technical),
            (self.soft, SkillCategory::Soft),
            (self.languages, SkillCategory::Language),
            (self.certifications, SkillCategory::Certification),
        ]
        .into_iter()
        .flat_map(|(list, category)| {
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|name| SkillEntry::new(name, category))
                .collect::<Vec<_>>()
        })
        .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct PositionInsight {
    pub job_title: String,
    pub company: String,
    pub duration: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileInsights {
    pub experience_level: ExperienceLevel,
    pub customization: LevelCustomization,
    pub positions: Vec<PositionInsight>,
}

fn reject_if_invalid(errors: Vec<FieldError>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::InvalidForm(errors))
    }
}

fn index_not_found(kind: &str, index: usize, len: usize) -> AppError {
    AppError::NotFound(format!(
        "No {kind} entry at index {index} ({len} entries)"
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let id = state.sessions.create().await;
    info!("Created session {id}");
    (StatusCode::CREATED, Json(CreateSessionResponse { id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(session.clone()))
}

/// PUT /api/v1/sessions/:id/personal-info
///
/// Replaces the personal info wholesale. Nothing is stored unless every field passes.
pub async fn handle_put_personal_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(info): Json<PersonalInfo>,
) -> Result<Json<PersonalInfo>, AppError> {
    let info = normalize_personal_info(info);
    reject_if_invalid(validate_personal_info(&info))?;

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.profile.personal_info = info.clone();
    Ok(Json(info))
}

/// POST /api/v1/sessions/:id/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<WorkExperience>,
) -> Result<(StatusCode, Json<Vec<WorkExperience>>), AppError> {
    reject_if_invalid(validate_work_experience(&entry))?;

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.profile.work_experience.push(entry);
    Ok((
        StatusCode::CREATED,
        Json(session.profile.work_experience.clone()),
    ))
}

/// DELETE /api/v1/sessions/:id/experience/:index
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<Vec<WorkExperience>>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let entries = &mut session.profile.work_experience;
    if index >= entries.len() {
        return Err(index_not_found("experience", index, entries.len()));
    }
    entries.remove(index);
    Ok(Json(entries.clone()))
}

/// POST /api/v1/sessions/:id/education
pub async fn handle_add_education(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<EducationEntry>,
) -> Result<(StatusCode, Json<Vec<EducationEntry>>), AppError> {
    reject_if_invalid(validate_education(&entry))?;

    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.profile.education.push(entry);
    Ok((StatusCode::CREATED, Json(session.profile.education.clone())))
}

/// DELETE /api/v1/sessions/:id/education/:index
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<Vec<EducationEntry>>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let entries = &mut session.profile.education;
    if index >= entries.len() {
        return Err(index_not_found("education", index, entries.len()));
    }
    entries.remove(index);
    Ok(Json(entries.clone()))
}

/// PUT /api/v1/sessions/:id/skills
pub async fn handle_put_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<SkillsForm>,
) -> Result<Json<Vec<SkillEntry>>, AppError> {
    let skills = form.into_entries();
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.profile.skills = skills.clone();
    Ok(Json(skills))
}

/// GET /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state.sessions.profile(id).await?;
    let now = Utc::now();
    let body = export_json(&profile, now)?;

    let first_name = match profile.personal_info.first_name.trim() {
        "" => "user",
        name => name,
    };
    let filename = sanitize_filename(&format!(
        "career_data_{first_name}_{}.json",
        now.format("%Y%m%d")
    ));
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/sessions/:id/import
///
/// Body is a previous export. The session is only touched once the whole
/// document has parsed.
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: String,
) -> Result<Json<CareerProfile>, AppError> {
    let handle = state.sessions.get(id).await?;
    let profile = import_json(&body)?;

    let mut session = handle.lock().await;
    session.profile = profile.clone();
    info!(
        "Imported {} experience, {} education, {} skill entries into session {id}",
        profile.work_experience.len(),
        profile.education.len(),
        profile.skills.len()
    );
    Ok(Json(profile))
}

/// GET /api/v1/sessions/:id/insights
///
/// Seniority bucket, the template emphasis that goes with it, and the
/// length of each position.
pub async fn handle_insights(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileInsights>, AppError> {
    let profile = state.sessions.profile(id).await?;
    let today = Utc::now().date_naive();
    let level = experience_level(&profile.work_experience, today);
    let positions = profile
        .work_experience
        .iter()
        .map(|e| PositionInsight {
            job_title: e.job_title.clone(),
            company: e.company.clone(),
            duration: experience_duration(e.start_date, e.end_date, today),
        })
        .collect();
    Ok(Json(ProfileInsights {
        experience_level: level,
        customization: customize_for_experience_level(level),
        positions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_form_splits_and_trims() {
        let form = SkillsForm {
            technical: "Python, Rust ,, ".to_string(),
            languages: "English".to_string(),
            ..SkillsForm::default()
        };
        let entries = form.into_entries();
        assert_eq!(
            entries,
            vec![
                SkillEntry::new("Python", SkillCategory::Technical),
                SkillEntry::new("Rust", SkillCategory::Technical),
                SkillEntry::new("English", SkillCategory::Language),
            ]
        );
    }

    #[test]
    fn test_empty_skills_form_clears_skills() {
        assert!(SkillsForm::default().into_entries().is_empty());
    }
}
