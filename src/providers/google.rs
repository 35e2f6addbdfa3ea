//! Gemini-style responses

use axum::http::StatusCode;

use super::coded_error;
use crate::scenario::StaticResponse;

/// Gemini errors carry a message and code but no `type`
pub fn auth_failure() -> StaticResponse {
    StaticResponse::json(
        StatusCode::UNAUTHORIZED,
        &coded_error("Invalid Authentication", StatusCode::UNAUTHORIZED),
    )
}
