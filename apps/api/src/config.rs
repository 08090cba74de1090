use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Suggestion service endpoint. Suggestions are disabled when unset.
    pub suggestion_service_url: Option<String>,
    pub suggestion_timeout_secs: u64,
    pub export_dir: PathBuf,
    /// Sessions with no mutation for this long are evicted.
    pub session_idle_ttl_secs: u64,
    pub session_sweep_interval_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            suggestion_service_url: optional_env("SUGGESTION_SERVICE_URL"),
            suggestion_timeout_secs: std::env::var("SUGGESTION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("SUGGESTION_TIMEOUT_SECS must be a whole number of seconds")?,
            export_dir: optional_env("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./exports")),
            session_idle_ttl_secs: std::env::var("SESSION_IDLE_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse::<u64>()
                .context("SESSION_IDLE_TTL_SECS must be a whole number of seconds")?,
            session_sweep_interval_secs: std::env::var("SESSION_SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse::<u64>()
                .context("SESSION_SWEEP_INTERVAL_SECS must be a whole number of seconds")?,
        })
    }
}

/// Unset and blank are treated alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
