pub mod catalog;
pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API (stateless)
        .route("/api/v1/templates", get(catalog::handle_list_templates))
        .route("/api/v1/templates/:name", get(catalog::handle_get_template))
        .route(
            "/api/v1/industries/:industry/templates",
            get(catalog::handle_industry_templates),
        )
        .route("/api/v1/ats/tips", get(catalog::handle_ats_tips))
        .route("/api/v1/keywords", post(catalog::handle_keywords))
        // Session API
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route("/api/v1/sessions/:id", get(session::handle_get_session))
        .route(
            "/api/v1/sessions/:id/personal-info",
            put(session::handle_put_personal_info),
        )
        .route(
            "/api/v1/sessions/:id/experience",
            post(session::handle_add_experience),
        )
        .route(
            "/api/v1/sessions/:id/experience/:index",
            delete(session::handle_remove_experience),
        )
        .route(
            "/api/v1/sessions/:id/education",
            post(session::handle_add_education),
        )
        .route(
            "/api/v1/sessions/:id/education/:index",
            delete(session::handle_remove_education),
        )
        .route("/api/v1/sessions/:id/skills", put(session::handle_put_skills))
        .route("/api/v1/sessions/:id/export", get(session::handle_export))
        .route("/api/v1/sessions/:id/import", post(session::handle_import))
        .route("/api/v1/sessions/:id/insights", get(session::handle_insights))
        // Generation API
        .route(
            "/api/v1/sessions/:id/resume",
            post(generation::handle_generate_resume),
        )
        .route(
            "/api/v1/sessions/:id/resume/suggestions",
            post(generation::handle_resume_suggestions),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter",
            post(generation::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter/customize",
            post(generation::handle_customize_cover_letter),
        )
        .route(
            "/api/v1/sessions/:id/job-match",
            post(generation::handle_job_match),
        )
        // Render API
        .route(
            "/api/v1/sessions/:id/resume/pdf",
            get(render::handle_resume_pdf),
        )
        .route(
            "/api/v1/sessions/:id/resume/ats",
            get(render::handle_resume_ats),
        )
        .route(
            "/api/v1/sessions/:id/cover-letter/pdf",
            get(render::handle_cover_letter_pdf),
        )
        .route(
            "/api/v1/sessions/:id/portfolio/pdf",
            get(render::handle_portfolio_pdf),
        )
        .with_state(state)
}
