//! Anthropic-style responses

use axum::http::StatusCode;
use serde::Serialize;

use crate::scenario::{Frame, StaticResponse, StreamScript, Termination};

/// `{"type":"error","message":…}`
#[derive(Debug, Clone, Serialize)]
pub struct AnthropicError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: &'static str,
}

pub fn auth_failure() -> StaticResponse {
    StaticResponse::json(
        StatusCode::UNAUTHORIZED,
        &AnthropicError {
            kind: "error",
            message: "Authentication Error",
        },
    )
}

fn message_start(model: &str) -> Frame {
    Frame::event(
        "message_start",
        &format!(
            r#"{{"message":{{"id":"msg_01J1.1","type":"message","role":"assistant","model":"{}","stop_reason":null,"stop_sequence":null,"usage":{{"input_tokens":10,"output_tokens":1}}}}}}"#,
            model
        ),
    )
}

fn content_block_start() -> Frame {
    Frame::event(
        "content_block_start",
        r#"{"content_block":{"type":"text","text":""},"index":0}"#,
    )
}

fn text_delta(text: &str) -> Frame {
    let data = serde_json::json!({
        "delta": {"type": "text_delta", "text": text},
        "index": 0,
    });
    Frame::event("content_block_delta", &data.to_string())
}

/// Partial content followed by an `error` event and nothing else
pub fn mid_stream_error() -> StreamScript {
    StreamScript::new(
        vec![
            message_start("claude-3-haiku-20240307"),
            content_block_start(),
            text_delta("Partial"),
            Frame::event("error", r#"{"message":"Simulated mid-stream error."}"#),
        ],
        Termination::Errored,
    )
}

/// A well-formed stream with one `ping` between the two text deltas
pub fn ping_stream() -> StreamScript {
    StreamScript::new(
        vec![
            message_start("claude-3-opus-20240229"),
            content_block_start(),
            text_delta("Hello"),
            Frame::event("ping", "{}"),
            text_delta(" World!"),
            Frame::event(
                "message_delta",
                r#"{"usage":{"output_tokens":2},"stop_reason":"end_turn","stop_sequence":null}"#,
            ),
            Frame::event("message_stop", "{}"),
        ],
        Termination::Complete,
    )
}
