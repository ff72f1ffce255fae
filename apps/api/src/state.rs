use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Generation backend. Production: `LlmClient`; tests swap in a fake.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
