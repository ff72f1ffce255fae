//! Read-only catalog endpoints: templates, industry recommendations, ATS tips
//! and keyword extraction. None of these touch a session.

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::insights::keywords::extract_keywords;
use crate::templates::recommendations::{
    known_industries, recommend_for_industry, AtsTips, ATS_TIPS,
};
use crate::templates::{available_templates, get_template, Template};

#[derive(Debug, Serialize)]
pub struct IndustryRecommendation {
    pub industry: String,
    pub templates: Vec<Template>,
    pub known_industries: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<String>,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<Template>> {
    Json(available_templates())
}

/// GET /api/v1/templates/:name
///
/// Unknown names resolve to the Professional template.
pub async fn handle_get_template(Path(name): Path<String>) -> Json<Template> {
    Json(get_template(&name))
}

/// GET /api/v1/industries/:industry/templates
pub async fn handle_industry_templates(
    Path(industry): Path<String>,
) -> Json<IndustryRecommendation> {
    let templates = recommend_for_industry(&industry)
        .into_iter()
        .map(|name| get_template(name.as_str()))
        .collect();
    Json(IndustryRecommendation {
        industry,
        templates,
        known_industries: known_industries(),
    })
}

/// GET /api/v1/ats/tips
pub async fn handle_ats_tips() -> Json<AtsTips> {
    Json(ATS_TIPS)
}

/// POST /api/v1/keywords
pub async fn handle_keywords(
    Json(request): Json<KeywordsRequest>,
) -> Result<Json<KeywordsResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }
    Ok(Json(KeywordsResponse {
        keywords: extract_keywords(&request.job_description),
    }))
}
