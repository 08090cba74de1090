use std::sync::Arc;

use crate::export::Exporter;
use crate::session::SessionStore;
use crate::suggestions::SuggestionSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable suggestion backend. Default: HTTP client, or the disabled
    /// source when no service URL is configured.
    pub suggestions: Arc<dyn SuggestionSource>,
    /// Pluggable export sink. Default: JSON files under `EXPORT_DIR`.
    pub exporter: Arc<dyn Exporter>,
}
