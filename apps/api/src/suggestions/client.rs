//! Suggestion Client: the single point of contact with the external
//! suggestion service.
//!
//! Wire contract: POST `{type, data}` → `{success, data, error?}`.
//! Any failure (transport, non-2xx, `success: false`, undecodable body)
//! degrades to an empty suggestion set plus a human-readable message; the
//! document is never touched here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::document::{Document, SectionKind};

const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE_MS: u64 = 500;

const DEFAULT_EXPERIENCE_LEVEL: &str = "Mid-level";
const DEFAULT_INDUSTRY: &str = "General business";

const NOT_CONFIGURED_MESSAGE: &str = "AI service not configured. Please contact support.";
const CONNECTION_MESSAGE: &str = "Error connecting to AI service. Please try again.";
const ANALYZE_FAILED_MESSAGE: &str = "Unable to analyze job description. Please try again.";
const GENERATE_FAILED_MESSAGE: &str = "Failed to generate content. Please try again.";

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    AnalyzeJob,
    GenerateSummary,
    GenerateAchievements,
}

/// The `data` object sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    pub experience_level: String,
    pub industry: String,
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl SuggestionContext {
    /// Role and company come from the first experience entry.
    pub fn from_document(doc: &Document, job_description: Option<String>) -> Self {
        let first = doc.experiences.iter().next();
        Self {
            job_description,
            current_role: first.and_then(|e| non_empty(&e.position)),
            current_company: first.and_then(|e| non_empty(&e.company)),
            experience_level: DEFAULT_EXPERIENCE_LEVEL.to_string(),
            industry: DEFAULT_INDUSTRY.to_string(),
        }
    }

    /// Role and company come from one experience or internship entry.
    /// `None` when the section carries no role or the entry is missing.
    pub fn for_entry(
        doc: &Document,
        section: SectionKind,
        id: Uuid,
        job_description: Option<String>,
    ) -> Option<Self> {
        let (role, company) = match section {
            SectionKind::Experience => doc
                .experiences
                .get(id)
                .map(|e| (non_empty(&e.position), non_empty(&e.company)))?,
            SectionKind::Internship => doc
                .internships
                .get(id)
                .map(|e| (non_empty(&e.role), non_empty(&e.company)))?,
            _ => return None,
        };
        Some(Self {
            current_role: role,
            current_company: company,
            ..Self::from_document(doc, job_description)
        })
    }
}

#[derive(Debug, Serialize)]
struct SuggestionRequest<'a> {
    #[serde(rename = "type")]
    kind: SuggestionKind,
    data: &'a SuggestionContext,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    success: bool,
    #[serde(default)]
    data: serde_json::Value,
    error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionSet {
    pub summary: Vec<String>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
    pub keywords: Vec<String>,
}

impl SuggestionSet {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.skills.is_empty()
            && self.achievements.is_empty()
            && self.keywords.is_empty()
    }
}

/// Returned to callers whatever happened upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionPayload {
    pub suggestions: SuggestionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SuggestionPayload {
    pub fn neutral(message: impl Into<String>) -> Self {
        Self {
            suggestions: SuggestionSet::default(),
            message: Some(message.into()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("suggestion service not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("service reported failure: {0}")]
    Rejected(String),

    #[error("undecodable suggestion data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SuggestionError {
    /// Message shown to the user in place of suggestions.
    pub fn user_message(&self, kind: SuggestionKind) -> &'static str {
        match self {
            SuggestionError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            SuggestionError::Transport(_) | SuggestionError::Status { .. } => CONNECTION_MESSAGE,
            SuggestionError::Rejected(_) | SuggestionError::Decode(_) => match kind {
                SuggestionKind::AnalyzeJob => ANALYZE_FAILED_MESSAGE,
                SuggestionKind::GenerateSummary | SuggestionKind::GenerateAchievements => {
                    GENERATE_FAILED_MESSAGE
                }
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Source trait and implementations
// ────────────────────────────────────────────────────────────────────────────

/// Where suggestions come from. Carried in `AppState` as `Arc<dyn SuggestionSource>`.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn fetch(
        &self,
        kind: SuggestionKind,
        context: &SuggestionContext,
    ) -> Result<SuggestionSet, SuggestionError>;
}

/// Used when no service URL is configured.
pub struct DisabledSuggestionSource;

#[async_trait]
impl SuggestionSource for DisabledSuggestionSource {
    async fn fetch(
        &self,
        _kind: SuggestionKind,
        _context: &SuggestionContext,
    ) -> Result<SuggestionSet, SuggestionError> {
        Err(SuggestionError::NotConfigured)
    }
}

#[derive(Clone)]
pub struct HttpSuggestionClient {
    client: Client,
    url: String,
}

impl HttpSuggestionClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SuggestionError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    /// Retries on 429, 502–504 and transport errors with exponential backoff.
    async fn post(&self, request: &SuggestionRequest<'_>) -> Result<ServiceResponse, SuggestionError> {
        let mut last_error: Option<SuggestionError> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if attempt > 0 {
                let delay = Duration::from_millis(BACKOFF_BASE_MS * (1 << (attempt - 1)));
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Suggestion call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&self.url).json(request).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(SuggestionError::Transport(e));
                    continue;
                }
            };

            let status = response.status();
            if is_retryable(status) {
                let message = response.text().await.unwrap_or_default();
                last_error = Some(SuggestionError::Status {
                    status: status.as_u16(),
                    message,
                });
                continue;
            }
            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(SuggestionError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        Err(last_error.unwrap_or(SuggestionError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE.as_u16(),
            message: format!("no response after {MAX_ATTEMPTS} attempts"),
        }))
    }
}

fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

#[async_trait]
impl SuggestionSource for HttpSuggestionClient {
    async fn fetch(
        &self,
        kind: SuggestionKind,
        context: &SuggestionContext,
    ) -> Result<SuggestionSet, SuggestionError> {
        let response = self
            .post(&SuggestionRequest {
                kind,
                data: context,
            })
            .await?;

        if !response.success {
            return Err(SuggestionError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "unspecified error".to_string()),
            ));
        }

        let set = decode_suggestions(kind, response.data)?;
        debug!(?kind, empty = set.is_empty(), "Suggestions received");
        Ok(set)
    }
}

/// `analyze_job` returns the four lists; the generate kinds return a bare list.
pub fn decode_suggestions(
    kind: SuggestionKind,
    data: serde_json::Value,
) -> Result<SuggestionSet, SuggestionError> {
    let set = match kind {
        SuggestionKind::AnalyzeJob => serde_json::from_value(data)?,
        SuggestionKind::GenerateSummary => SuggestionSet {
            summary: serde_json::from_value(data)?,
            ..SuggestionSet::default()
        },
        SuggestionKind::GenerateAchievements => SuggestionSet {
            achievements: serde_json::from_value(data)?,
            ..SuggestionSet::default()
        },
    };
    Ok(set)
}

/// Never fails: errors become a neutral payload carrying a user-facing message.
pub async fn fetch_suggestions(
    source: &dyn SuggestionSource,
    kind: SuggestionKind,
    context: &SuggestionContext,
) -> SuggestionPayload {
    match source.fetch(kind, context).await {
        Ok(suggestions) => SuggestionPayload {
            suggestions,
            message: None,
        },
        Err(e) => {
            warn!(?kind, error = %e, "Suggestion fetch degraded to neutral payload");
            SuggestionPayload::neutral(e.user_message(kind))
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{routing::post, Json, Router};
    use serde_json::json;

    struct FixedSource(serde_json::Value);

    #[async_trait]
    impl SuggestionSource for FixedSource {
        async fn fetch(
            &self,
            kind: SuggestionKind,
            _context: &SuggestionContext,
        ) -> Result<SuggestionSet, SuggestionError> {
            decode_suggestions(kind, self.0.clone())
        }
    }

    async fn spawn_service(reply: serde_json::Value) -> String {
        let app = Router::new().route(
            "/",
            post(move |Json(body): Json<serde_json::Value>| {
                let reply = reply.clone();
                async move {
                    assert!(body.get("type").is_some());
                    Json(reply)
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/")
    }

    /// Answers with `statuses` in order (empty JSON bodies), then with `reply`.
    async fn spawn_scripted_service(
        statuses: Vec<u16>,
        reply: serde_json::Value,
    ) -> (String, Arc<AtomicUsize>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/",
            post(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let scripted = statuses.get(n).copied();
                let reply = reply.clone();
                async move {
                    match scripted {
                        Some(code) => (
                            axum::http::StatusCode::from_u16(code).unwrap(),
                            Json(json!({})),
                        ),
                        None => (axum::http::StatusCode::OK, Json(reply)),
                    }
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), hits)
    }

    #[test]
    fn test_context_defaults_from_first_experience() {
        let mut doc = Document::new();
        let id = doc.experiences.iter().next().unwrap().id;
        doc.update(SectionKind::Experience, id, "position", "Engineer".to_string());
        let ctx = SuggestionContext::from_document(&doc, Some("Build APIs".to_string()));
        let json = serde_json::to_value(&ctx).unwrap();
        assert_eq!(json["jobDescription"], "Build APIs");
        assert_eq!(json["currentRole"], "Engineer");
        assert!(json.get("currentCompany").is_none());
        assert_eq!(json["experienceLevel"], "Mid-level");
        assert_eq!(json["industry"], "General business");
    }

    #[test]
    fn test_context_for_targeted_entry() {
        let mut doc = Document::new();
        let first = doc.experiences.iter().next().unwrap().id;
        doc.update(SectionKind::Experience, first, "position", "Engineer".to_string());
        let second = doc.add(SectionKind::Experience);
        doc.update(SectionKind::Experience, second, "position", "Lead".to_string());
        doc.update(SectionKind::Experience, second, "company", "Acme".to_string());

        let ctx = SuggestionContext::for_entry(&doc, SectionKind::Experience, second, None).unwrap();
        assert_eq!(ctx.current_role.as_deref(), Some("Lead"));
        assert_eq!(ctx.current_company.as_deref(), Some("Acme"));
        assert_eq!(ctx.experience_level, "Mid-level");

        let internship = doc.internships.iter().next().unwrap().id;
        doc.update(SectionKind::Internship, internship, "role", "Intern".to_string());
        let ctx =
            SuggestionContext::for_entry(&doc, SectionKind::Internship, internship, None).unwrap();
        assert_eq!(ctx.current_role.as_deref(), Some("Intern"));
        assert!(ctx.current_company.is_none());

        assert!(
            SuggestionContext::for_entry(&doc, SectionKind::Experience, Uuid::new_v4(), None)
                .is_none()
        );
        let project = doc.projects.iter().next().unwrap().id;
        assert!(SuggestionContext::for_entry(&doc, SectionKind::Project, project, None).is_none());
    }

    #[test]
    fn test_request_envelope() {
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let request = SuggestionRequest {
            kind: SuggestionKind::GenerateSummary,
            data: &ctx,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "generate_summary");
        assert!(json["data"].is_object());
    }

    #[test]
    fn test_decode_analyze_job_tolerates_missing_lists() {
        let set = decode_suggestions(
            SuggestionKind::AnalyzeJob,
            json!({"skills": ["Rust"], "keywords": ["async"]}),
        )
        .unwrap();
        assert_eq!(set.skills, vec!["Rust"]);
        assert_eq!(set.keywords, vec!["async"]);
        assert!(set.summary.is_empty());
    }

    #[test]
    fn test_decode_generate_kinds() {
        let set =
            decode_suggestions(SuggestionKind::GenerateAchievements, json!(["Did a thing"]))
                .unwrap();
        assert_eq!(set.achievements, vec!["Did a thing"]);
        assert!(decode_suggestions(SuggestionKind::GenerateSummary, json!({"x": 1})).is_err());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            SuggestionError::NotConfigured.user_message(SuggestionKind::AnalyzeJob),
            NOT_CONFIGURED_MESSAGE
        );
        let rejected = SuggestionError::Rejected("boom".to_string());
        assert_eq!(
            rejected.user_message(SuggestionKind::AnalyzeJob),
            ANALYZE_FAILED_MESSAGE
        );
        assert_eq!(
            rejected.user_message(SuggestionKind::GenerateSummary),
            GENERATE_FAILED_MESSAGE
        );
        let status = SuggestionError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(
            status.user_message(SuggestionKind::GenerateAchievements),
            CONNECTION_MESSAGE
        );
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_disabled_source_yields_neutral_payload() {
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let payload =
            fetch_suggestions(&DisabledSuggestionSource, SuggestionKind::AnalyzeJob, &ctx).await;
        assert!(payload.suggestions.is_empty());
        assert_eq!(payload.message.as_deref(), Some(NOT_CONFIGURED_MESSAGE));
    }

    #[tokio::test]
    async fn test_undecodable_data_yields_neutral_payload() {
        let source = FixedSource(json!("not a list"));
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let payload =
            fetch_suggestions(&source, SuggestionKind::GenerateAchievements, &ctx).await;
        assert!(payload.suggestions.is_empty());
        assert_eq!(payload.message.as_deref(), Some(GENERATE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_http_client_decodes_success() {
        let url = spawn_service(json!({
            "success": true,
            "data": {"summary": ["Seasoned engineer"], "skills": ["Rust", "Go"]}
        }))
        .await;
        let client = HttpSuggestionClient::new(url, Duration::from_secs(5)).unwrap();
        let ctx = SuggestionContext::from_document(&Document::new(), Some("JD".to_string()));
        let set = client.fetch(SuggestionKind::AnalyzeJob, &ctx).await.unwrap();
        assert_eq!(set.summary, vec!["Seasoned engineer"]);
        assert_eq!(set.skills, vec!["Rust", "Go"]);
    }

    #[tokio::test]
    async fn test_http_client_reports_service_failure() {
        let url = spawn_service(json!({"success": false, "error": "quota"})).await;
        let client = HttpSuggestionClient::new(url, Duration::from_secs(5)).unwrap();
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let err = client
            .fetch(SuggestionKind::GenerateSummary, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SuggestionError::Rejected(ref m) if m == "quota"));
    }

    #[tokio::test]
    async fn test_http_client_retries_after_unavailable() {
        let (url, hits) = spawn_scripted_service(
            vec![503],
            json!({"success": true, "data": ["Shipped v2"]}),
        )
        .await;
        let client = HttpSuggestionClient::new(url, Duration::from_secs(5)).unwrap();
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let set = client
            .fetch(SuggestionKind::GenerateAchievements, &ctx)
            .await
            .unwrap();
        assert_eq!(set.achievements, vec!["Shipped v2"]);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_http_client_gives_up_after_max_attempts() {
        let (url, hits) = spawn_scripted_service(
            vec![429, 502, 503, 504],
            json!({"success": true, "data": []}),
        )
        .await;
        let client = HttpSuggestionClient::new(url, Duration::from_secs(5)).unwrap();
        let ctx = SuggestionContext::from_document(&Document::new(), None);
        let err = client
            .fetch(SuggestionKind::GenerateSummary, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, SuggestionError::Status { status: 503, .. }));
        assert_eq!(hits.load(Ordering::SeqCst), MAX_ATTEMPTS as usize);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried_and_degrades() {
        let (url, hits) =
            spawn_scripted_service(vec![500], json!({"success": true, "data": []})).await;
        let client = HttpSuggestionClient::new(url, Duration::from_secs(5)).unwrap();
        let ctx = SuggestionContext::from_document(&Document::new(), Some("JD".to_string()));
        let payload = fetch_suggestions(&client, SuggestionKind::AnalyzeJob, &ctx).await;
        assert!(payload.suggestions.is_empty());
        assert_eq!(payload.message.as_deref(), Some(CONNECTION_MESSAGE));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
