//! Route definitions
//!
//! Paths arrive here with any `:action` suffix already split off, so
//! `/v1/models/gemini-pro:generateContent` matches `/v1/models/:model_id`.
//! Provider handlers read the action where it selects an endpoint and ignore
//! it elsewhere. Only the control routes reject a suffix.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::control;
use super::handlers;
use super::middleware::reject_action;
use super::state::AppState;

/// OpenAI compatible routes
pub fn openai_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .route("/chat/completions", post(handlers::chat_completions))
        .route("/v1/models", get(handlers::list_models))
        .route("/models", get(handlers::list_models))
        // Also serves the Gemini `/v1/files:upload` variant
        .route("/v1/files", post(handlers::upload_file))
        .route("/files", post(handlers::upload_file))
}

/// Anthropic compatible routes
pub fn anthropic_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/messages", post(handlers::messages))
        .route("/messages", post(handlers::messages))
        .route(
            "/v1/messages/count_tokens",
            post(handlers::anthropic_count_tokens),
        )
        .route(
            "/messages/count_tokens",
            post(handlers::anthropic_count_tokens),
        )
}

/// Google/Gemini compatible routes
pub fn google_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/models/:model_id", post(handlers::gemini_model_action))
        .route("/models/:model_id", post(handlers::gemini_model_action))
}

/// Control plane routes
pub fn control_routes() -> Router<AppState> {
    Router::new()
        .route("/_control/status", get(control::control_status))
        .route("/_control/restart", post(control::control_restart))
        .route("/_control/shutdown", post(control::control_shutdown))
        .route_layer(middleware::from_fn(reject_action))
}
