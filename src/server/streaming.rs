//! Streaming response emitter
//!
//! Frames go out exactly as scripted, one body chunk each. Nothing is added:
//! no SSE re-encoding, no keep-alive comments, no terminator.

use std::convert::Infallible;
use std::pin::Pin;
use std::time::Duration;

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use futures::stream::{self, Stream};
use tokio::time::sleep;

use crate::scenario::{ContentType, StreamScript};

/// Lazy, non-restartable sequence of frame bytes
pub fn frame_stream(
    script: StreamScript,
) -> Pin<Box<dyn Stream<Item = Result<Bytes, Infallible>> + Send>> {
    Box::pin(stream::unfold(
        script.frames.into_iter(),
        |mut iter| async move {
            let frame = iter.next()?;
            if frame.delay > Duration::ZERO {
                sleep(frame.delay).await;
            }
            Some((Ok::<_, Infallible>(frame.bytes), iter))
        },
    ))
}

/// A `200 text/event-stream` response that plays `script`
pub fn stream_response(script: StreamScript) -> Response {
    (
        [
            (header::CONTENT_TYPE, ContentType::EventStream.as_str()),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(frame_stream(script)),
    )
        .into_response()
}
