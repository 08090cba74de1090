mod config;
mod document;
mod errors;
mod export;
mod routes;
mod scoring;
mod session;
mod state;
mod suggestions;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::JsonFileExporter;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;
use crate::suggestions::{DisabledSuggestionSource, HttpSuggestionClient, SuggestionSource};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Suggestion backend: HTTP when configured, otherwise every fetch degrades
    // to the "not configured" payload.
    let suggestions: Arc<dyn SuggestionSource> = match &config.suggestion_service_url {
        Some(url) => {
            let timeout = Duration::from_secs(config.suggestion_timeout_secs);
            let client = HttpSuggestionClient::new(url.clone(), timeout)?;
            info!(%url, timeout_secs = config.suggestion_timeout_secs, "Suggestion client initialized");
            Arc::new(client)
        }
        None => {
            warn!("SUGGESTION_SERVICE_URL not set; suggestions disabled");
            Arc::new(DisabledSuggestionSource)
        }
    };

    let exporter = Arc::new(JsonFileExporter::new(config.export_dir.clone()));
    info!("Exports will be written to {}", config.export_dir.display());

    let sessions = SessionStore::new();
    let idle_ttl = i64::try_from(config.session_idle_ttl_secs)
        .ok()
        .and_then(chrono::Duration::try_seconds)
        .context("SESSION_IDLE_TTL_SECS is too large")?;
    // interval() panics on a zero period
    let sweep_every = Duration::from_secs(config.session_sweep_interval_secs.max(1));
    sessions.spawn_idle_sweeper(idle_ttl, sweep_every);
    info!(
        idle_ttl_secs = config.session_idle_ttl_secs,
        sweep_every_secs = sweep_every.as_secs(),
        "Idle session sweeper started"
    );

    // Build app state
    let state = AppState {
        sessions,
        suggestions,
        exporter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
