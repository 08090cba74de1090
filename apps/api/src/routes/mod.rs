pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(handlers::handle_list_templates))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        // Document editing
        .route(
            "/api/v1/sessions/:id/personal-info",
            patch(handlers::handle_update_personal_info),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section",
            post(handlers::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section/:entry_id",
            patch(handlers::handle_update_entry).delete(handlers::handle_remove_entry),
        )
        .route(
            "/api/v1/sessions/:id/skills",
            post(handlers::handle_add_skill).delete(handlers::handle_remove_skill),
        )
        .route(
            "/api/v1/sessions/:id/interests",
            post(handlers::handle_add_interest).delete(handlers::handle_remove_interest),
        )
        // Scoring, templates, rendering
        .route("/api/v1/sessions/:id/score", get(handlers::handle_score))
        .route(
            "/api/v1/sessions/:id/template",
            put(handlers::handle_set_template),
        )
        .route("/api/v1/sessions/:id/render", get(handlers::handle_render))
        // Suggestions
        .route(
            "/api/v1/sessions/:id/suggestions",
            post(handlers::handle_fetch_suggestions),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/apply",
            post(handlers::handle_apply_suggestion),
        )
        // Export
        .route("/api/v1/sessions/:id/export", post(handlers::handle_export))
        .with_state(state)
}
