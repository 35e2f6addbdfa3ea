//! HTTP request handlers
//!
//! Every provider handler does the same three things: read the selector,
//! look it up in its endpoint's table, and play the selected behavior.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, Uri},
    response::{IntoResponse, Response},
    Extension,
};
use futures::StreamExt;
use tracing::{debug, warn};

use super::action::PathAction;
use super::state::AppState;
use super::streaming::stream_response;
use crate::error::MockError;
use crate::scenario::{extract_selector, Behavior, Endpoint};

/// Select and play the behavior for one request
pub async fn dispatch(
    state: &AppState,
    endpoint: Endpoint,
    headers: &HeaderMap,
    uri: &Uri,
    body: Body,
) -> Response {
    let selector = extract_selector(headers, uri.query());
    let selection = state
        .catalog
        .select(endpoint, selector.as_ref().map(|k| k.as_str()));

    match selection.scenario {
        Some(scenario) => debug!(
            endpoint = ?endpoint,
            scenario,
            kind = selection.behavior.kind(),
            "Scenario selected"
        ),
        None => debug!(
            endpoint = ?endpoint,
            selector = selector.as_ref().map(|k| k.as_str()).unwrap_or(""),
            "No scenario matched"
        ),
    }

    match selection.behavior {
        Behavior::Static(response) => response.clone().into_response(),
        Behavior::Stream(script) => stream_response(script.clone()),
        Behavior::Upload(rule) => {
            let length = upload_length(headers, body).await;
            debug!(endpoint = ?endpoint, bytes = length, "Evaluating upload size");
            rule.evaluate(length).into_response()
        }
    }
}

/// Declared `Content-Length`, or the streamed byte count when none is declared
async fn upload_length(headers: &HeaderMap, body: Body) -> u64 {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    if let Some(length) = declared {
        return length;
    }

    let mut total = 0u64;
    let mut stream = body.into_data_stream();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => total += bytes.len() as u64,
            Err(e) => {
                warn!(error = %e, bytes = total, "Upload body ended with an error");
                break;
            }
        }
    }
    total
}

// ============== OpenAI Handlers ==============

/// POST /v1/chat/completions
pub async fn chat_completions(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    dispatch(&state, Endpoint::ChatCompletions, &headers, &uri, body).await
}

/// GET /v1/models
pub async fn list_models(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    dispatch(&state, Endpoint::ListModels, &headers, &uri, body).await
}

/// POST /v1/files, POST /v1/files:upload
///
/// Any suffix other than `upload` plays the plain files table.
pub async fn upload_file(
    State(state): State<AppState>,
    action: Option<Extension<PathAction>>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    let endpoint = match action.as_ref().map(|Extension(a)| a.as_str()) {
        Some("upload") => Endpoint::GeminiFileUpload,
        _ => Endpoint::FileUpload,
    };
    dispatch(&state, endpoint, &headers, &uri, body).await
}

// ============== Anthropic Handlers ==============

/// POST /v1/messages
pub async fn messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    dispatch(&state, Endpoint::Messages, &headers, &uri, body).await
}

/// POST /v1/messages/count_tokens
pub async fn anthropic_count_tokens(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    dispatch(&state, Endpoint::AnthropicCountTokens, &headers, &uri, body).await
}

// ============== Google/Gemini Handlers ==============

/// POST /v1/models/:model_id:{generateContent,streamGenerateContent,countTokens}
pub async fn gemini_model_action(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    action: Option<Extension<PathAction>>,
    headers: HeaderMap,
    uri: Uri,
    body: Body,
) -> Response {
    let action = action.as_ref().map(|Extension(a)| a.as_str());
    let endpoint = gemini_endpoint(action);
    debug!(model = %model_id, action = action.unwrap_or(""), endpoint = ?endpoint, "Gemini model request");
    dispatch(&state, endpoint, &headers, &uri, body).await
}

/// Endpoint for a model path's action; unknown or absent actions generate
pub fn gemini_endpoint(action: Option<&str>) -> Endpoint {
    match action {
        Some("streamGenerateContent") => Endpoint::GeminiStreamGenerateContent,
        Some("countTokens") => Endpoint::GeminiCountTokens,
        _ => Endpoint::GeminiGenerateContent,
    }
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> MockError {
    MockError::NotFound(uri.path().to_string())
}
