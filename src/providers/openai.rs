//! OpenAI-style responses

use std::time::Duration;

use axum::http::StatusCode;
use serde::Serialize;

use super::typed_error;
use crate::scenario::{FileReceipt, Frame, StaticResponse, StreamScript, Termination};

/// Pause between the valid chunk and the truncated one
pub const ABRUPT_STREAM_GAP: Duration = Duration::from_millis(10);

/// Receipt for a small accepted upload
pub const SMALL_FILE_RECEIPT: FileReceipt = FileReceipt {
    id: "file-123",
    filename: "test_file.txt",
    purpose: "fine-tune",
};

/// Receipt for a large upload under the size limit
pub const LARGE_FILE_RECEIPT: FileReceipt = FileReceipt {
    id: "file-456",
    filename: "large_test_file.bin",
    purpose: "fine-tune",
};

pub fn auth_failure() -> StaticResponse {
    StaticResponse::json(
        StatusCode::UNAUTHORIZED,
        &typed_error("Invalid Authentication", "invalid_request_error", StatusCode::UNAUTHORIZED),
    )
}

pub fn rate_limit() -> StaticResponse {
    StaticResponse::json(
        StatusCode::TOO_MANY_REQUESTS,
        &typed_error("Rate limit exceeded", "rate_limit_error", StatusCode::TOO_MANY_REQUESTS),
    )
}

/// A 500 whose body is an HTML page instead of JSON
pub fn html_server_error() -> StaticResponse {
    StaticResponse::html(
        StatusCode::INTERNAL_SERVER_ERROR,
        "<html><body><h1>500 Internal Server Error</h1></body></html>",
    )
}

/// `{"object":"list","data":[]}`
#[derive(Debug, Clone, Serialize)]
pub struct ModelList {
    pub object: &'static str,
    pub data: Vec<serde_json::Value>,
}

pub fn empty_model_list() -> StaticResponse {
    StaticResponse::json(
        StatusCode::OK,
        &ModelList {
            object: "list",
            data: Vec::new(),
        },
    )
}

/// One valid chunk, then a chunk cut off inside a string with no `[DONE]`
pub fn abrupt_stream() -> StreamScript {
    StreamScript::new(
        vec![
            Frame::data(
                r#"{"id":"chatcmpl-123","object":"chat.completion.chunk","created":1694268190,"model":"gpt-3.5-turbo-0613","choices":[{"index":0,"delta":{"role":"assistant"}},{"finish_reason":null}]}"#,
            ),
            Frame::after(ABRUPT_STREAM_GAP, r#"data: {"id":"truncated_chunk", "content":"partial"#),
        ],
        Termination::Abrupt,
    )
}
