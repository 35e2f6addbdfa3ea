//! Response behaviors a scenario can select

use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;

use crate::providers;

/// Response content types produced by the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Json,
    EventStream,
    Html,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::EventStream => "text/event-stream",
            Self::Html => "text/html; charset=utf-8",
        }
    }
}

/// A fixed status, content type and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticResponse {
    pub status: StatusCode,
    pub content_type: ContentType,
    pub body: Bytes,
}

impl StaticResponse {
    /// Serialize `body` as the JSON payload
    pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Self {
        Self {
            status,
            content_type: ContentType::Json,
            body: Bytes::from(serde_json::to_vec(body).unwrap_or_default()),
        }
    }

    pub fn html(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            content_type: ContentType::Html,
            body: Bytes::from_static(body.as_bytes()),
        }
    }
}

impl IntoResponse for StaticResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, self.content_type.as_str())],
            self.body,
        )
            .into_response()
    }
}

/// One unit of a streamed response
///
/// `bytes` are written as-is. A frame may end in the middle of a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Pause before the frame is written
    pub delay: Duration,
    pub bytes: Bytes,
}

impl Frame {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            delay: Duration::ZERO,
            bytes: bytes.into(),
        }
    }

    pub fn after(delay: Duration, bytes: impl Into<Bytes>) -> Self {
        Self {
            delay,
            bytes: bytes.into(),
        }
    }

    /// A server-sent event with an explicit `event:` line
    pub fn event(event: &str, data: &str) -> Self {
        Self::new(format!("event: {}\ndata: {}\n\n", event, data))
    }

    /// A server-sent event carrying only a `data:` line
    pub fn data(data: &str) -> Self {
        Self::new(format!("data: {}\n\n", data))
    }
}

/// How a streamed script ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The last frames are the provider's normal end-of-stream events
    Complete,
    /// The last frame is cut off mid-object and no end marker follows
    Abrupt,
    /// An error event follows partial content; no end marker follows
    Errored,
}

/// An ordered, finite sequence of frames sent over `text/event-stream`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamScript {
    pub frames: Vec<Frame>,
    pub termination: Termination,
}

impl StreamScript {
    pub fn new(frames: Vec<Frame>, termination: Termination) -> Self {
        Self { frames, termination }
    }
}

/// Upload outcome gated on the size of the uploaded content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadRule {
    /// Reject zero-length content; accept anything else
    RejectEmpty { accepted: FileReceipt },
    /// Reject content strictly larger than `limit` bytes
    RejectAbove { limit: u64, accepted: FileReceipt },
}

/// Fixed metadata echoed back for an accepted upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReceipt {
    pub id: &'static str,
    pub filename: &'static str,
    pub purpose: &'static str,
}

impl UploadRule {
    /// Resolve the rule against the request's byte count
    pub fn evaluate(&self, content_length: u64) -> StaticResponse {
        match *self {
            Self::RejectEmpty { .. } if content_length == 0 => StaticResponse::json(
                StatusCode::BAD_REQUEST,
                &providers::coded_error("File is empty", StatusCode::BAD_REQUEST),
            ),
            Self::RejectAbove { limit, .. } if content_length > limit => StaticResponse::json(
                StatusCode::PAYLOAD_TOO_LARGE,
                &providers::coded_error("File size exceeds limit", StatusCode::PAYLOAD_TOO_LARGE),
            ),
            Self::RejectEmpty { accepted } | Self::RejectAbove { accepted, .. } => {
                StaticResponse::json(StatusCode::OK, &providers::FileObject::new(&accepted, content_length))
            }
        }
    }
}

/// What a matched scenario does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior {
    Static(StaticResponse),
    Stream(StreamScript),
    Upload(UploadRule),
}

impl Behavior {
    /// Short name used in catalog listings and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static(_) => "static",
            Self::Stream(_) => "stream",
            Self::Upload(_) => "upload",
        }
    }

    /// Status code when it does not depend on the request
    pub fn fixed_status(&self) -> Option<StatusCode> {
        match self {
            Self::Static(r) => Some(r.status),
            Self::Stream(_) => Some(StatusCode::OK),
            Self::Upload(_) => None,
        }
    }
}
