use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionBackend;
use crate::store::AppStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend behind a trait object so tests can swap in a
    /// scripted fake.
    pub llm: Arc<dyn CompletionBackend>,
    pub store: AppStore,
    pub config: Config,
}
