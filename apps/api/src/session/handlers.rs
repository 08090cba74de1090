use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::document::{Document, Outcome, SectionKind};
use crate::errors::AppError;
use crate::export::{prepare_export, ExportReceipt};
use crate::scoring::{score, AtsReport};
use crate::session::Session;
use crate::state::AppState;
use crate::suggestions::{
    apply, apply_skills, apply_to_entry, enhance_entry, fetch_suggestions, ApplyOutcome, SuggestionContext,
    SuggestionKind, SuggestionPayload, SuggestionTag,
};
use crate::templates::{catalog, render, RenderedView, TemplateDescriptor, TemplateId};

// ────────────────────────────────────────────────────────────────────────────
// Request / response bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct FieldUpdate {
    pub field: String,
    pub value: String,
}

#[derive(Deserialize)]
pub struct TagValue {
    pub value: String,
}

#[derive(Deserialize)]
pub struct TemplateSelection {
    pub template: String,
}

#[derive(Deserialize)]
pub struct TemplateQuery {
    pub template: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionQuery {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub job_description: Option<String>,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    /// Entry being enhanced; its role and company replace the first
    /// experience's in the request context.
    pub target: Option<EntryTarget>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyMode {
    /// Each item becomes one more bullet line.
    #[default]
    Append,
    /// The description is replaced by a bullet block of all items.
    Replace,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTarget {
    pub section: SectionKind,
    pub entry_id: Uuid,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub tag: SuggestionTag,
    #[serde(default)]
    pub content: String,
    /// Several suggestions at once. Accepted for skills and achievement
    /// targets; a summary takes exactly one.
    #[serde(default)]
    pub items: Vec<String>,
    pub target: Option<EntryTarget>,
    #[serde(default)]
    pub mode: ApplyMode,
}

#[derive(Serialize)]
pub struct MutationResponse {
    pub outcome: Outcome,
    pub session: Session,
}

#[derive(Serialize)]
pub struct AddEntryResponse {
    pub entry_id: Uuid,
    pub session: Session,
}

#[derive(Serialize)]
pub struct ApplyResponse {
    pub result: ApplyOutcome,
    pub session: Session,
}

#[derive(Serialize)]
pub struct ExportResponse {
    pub receipt: ExportReceipt,
    pub ats_score: u32,
    /// Set while critical checklist items still fail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

fn parse_template(raw: &str) -> Result<TemplateId, AppError> {
    raw.parse::<TemplateId>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

async fn snapshot(state: &AppState, id: Uuid) -> Result<Session, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| session_not_found(id))
}

async fn mutate(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut Document) -> Outcome,
) -> Result<Json<MutationResponse>, AppError> {
    let (outcome, session) = state
        .sessions
        .with_document(id, f)
        .await
        .ok_or_else(|| session_not_found(id))?;
    debug!(session_id = %id, ?outcome, "Document mutation");
    Ok(Json(MutationResponse { outcome, session }))
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateDescriptor>> {
    Json(catalog())
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<Session>) {
    let session = state.sessions.create().await;
    info!(session_id = %session.id, "Session created");
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(snapshot(&state, id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(session_not_found(id));
    }
    info!(session_id = %id, "Session discarded");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Document mutations
// ────────────────────────────────────────────────────────────────────────────

/// PATCH /api/v1/sessions/:id/personal-info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.update_personal_info(&req.field, req.value)).await
}

/// POST /api/v1/sessions/:id/sections/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, SectionKind)>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError> {
    let (entry_id, session) = state
        .sessions
        .with_document(id, |doc| doc.add(section))
        .await
        .ok_or_else(|| session_not_found(id))?;
    debug!(session_id = %id, %section, %entry_id, "Entry added");
    Ok((
        StatusCode::CREATED,
        Json(AddEntryResponse { entry_id, session }),
    ))
}

/// PATCH /api/v1/sessions/:id/sections/:section/:entry_id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((id, section, entry_id)): Path<(Uuid, SectionKind, Uuid)>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| {
        doc.update(section, entry_id, &req.field, req.value)
    })
    .await
}

/// DELETE /api/v1/sessions/:id/sections/:section/:entry_id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, section, entry_id)): Path<(Uuid, SectionKind, Uuid)>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.remove(section, entry_id)).await
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagValue>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.add_skill(&req.value)).await
}

/// DELETE /api/v1/sessions/:id/skills
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagValue>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.remove_skill(&req.value)).await
}

/// POST /api/v1/sessions/:id/interests
pub async fn handle_add_interest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagValue>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.add_interest(&req.value)).await
}

/// DELETE /api/v1/sessions/:id/interests
pub async fn handle_remove_interest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagValue>,
) -> Result<Json<MutationResponse>, AppError> {
    mutate(&state, id, |doc| doc.remove_interest(&req.value)).await
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring and rendering
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/score
pub async fn handle_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AtsReport>, AppError> {
    let session = snapshot(&state, id).await?;
    Ok(Json(score(&session.document)))
}

/// PUT /api/v1/sessions/:id/template
pub async fn handle_set_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateSelection>,
) -> Result<Json<Session>, AppError> {
    let template = parse_template(&req.template)?;
    let session = state
        .sessions
        .set_template(id, template)
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(session))
}

/// GET /api/v1/sessions/:id/render?template=
///
/// Renders with the session's selected template unless one is given.
pub async fn handle_render(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<RenderedView>, AppError> {
    let session = snapshot(&state, id).await?;
    let template = match query.template.as_deref() {
        Some(raw) => parse_template(raw)?,
        None => session.template,
    };
    Ok(Json(render(&session.document, template)))
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/suggestions
pub async fn handle_fetch_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SuggestionQuery>,
) -> Result<Json<SuggestionPayload>, AppError> {
    let job_description = req
        .job_description
        .filter(|jd| !jd.trim().is_empty());
    if req.kind == SuggestionKind::AnalyzeJob && job_description.is_none() {
        return Err(AppError::Validation(
            "jobDescription must not be empty".to_string(),
        ));
    }

    let session = snapshot(&state, id).await?;
    let mut context = match req.target {
        Some(target) => SuggestionContext::for_entry(
            &session.document,
            target.section,
            target.entry_id,
            job_description,
        )
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "No {} entry {} with a role to enhance",
                target.section, target.entry_id
            ))
        })?,
        None => SuggestionContext::from_document(&session.document, job_description),
    };
    if let Some(level) = req.experience_level.filter(|v| !v.trim().is_empty()) {
        context.experience_level = level;
    }
    if let Some(industry) = req.industry.filter(|v| !v.trim().is_empty()) {
        context.industry = industry;
    }

    let payload = fetch_suggestions(state.suggestions.as_ref(), req.kind, &context).await;
    info!(
        session_id = %id,
        kind = ?req.kind,
        degraded = payload.message.is_some(),
        "Suggestions fetched"
    );
    Ok(Json(payload))
}

/// POST /api/v1/sessions/:id/suggestions/apply
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<Json<ApplyResponse>, AppError> {
    let mut items: Vec<String> = req
        .items
        .into_iter()
        .filter(|i| !i.trim().is_empty())
        .collect();
    if items.is_empty() && !req.content.trim().is_empty() {
        items.push(req.content.clone());
    }
    if items.is_empty() {
        return Err(AppError::Validation(
            "content must not be empty".to_string(),
        ));
    }
    if req.tag == SuggestionTag::Summary && items.len() > 1 {
        return Err(AppError::Validation(
            "a summary suggestion takes exactly one item".to_string(),
        ));
    }

    let (result, session) = state
        .sessions
        .with_document(id, |doc| match (req.tag, req.target) {
            (SuggestionTag::Achievement, Some(target)) => {
                let outcome = match req.mode {
                    ApplyMode::Replace => {
                        enhance_entry(doc, target.section, target.entry_id, &items)
                    }
                    ApplyMode::Append => items
                        .iter()
                        .map(|item| apply_to_entry(doc, target.section, target.entry_id, item))
                        .find(|o| !o.is_applied())
                        .unwrap_or(Outcome::Applied),
                };
                ApplyOutcome::Entry {
                    section: target.section,
                    entry_id: target.entry_id,
                    outcome,
                }
            }
            (SuggestionTag::Skill, _) => apply_skills(doc, &items),
            (tag, _) => apply(doc, &items[0], tag),
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    Ok(Json(ApplyResponse { result, session }))
}

// ────────────────────────────────────────────────────────────────────────────
// Export
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/export?template=
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<TemplateQuery>,
) -> Result<Json<ExportResponse>, AppError> {
    let session = snapshot(&state, id).await?;
    let template = match query.template.as_deref() {
        Some(raw) => parse_template(raw)?,
        None => session.template,
    };

    let bundle = prepare_export(&session.document, template)?;
    let report = score(&session.document);
    let receipt = state.exporter.export(&bundle).await?;

    let warning = (!report.export_ready()).then(|| {
        format!(
            "{} critical ATS issue(s) remain: fix them before sending this resume.",
            report.critical_issues
        )
    });

    info!(
        session_id = %id,
        %template,
        file_name = %receipt.file_name,
        ats_score = report.value,
        "Resume exported"
    );

    Ok(Json(ExportResponse {
        receipt,
        ats_score: report.value,
        warning,
    }))
}
