//! HTTP middleware implementations

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::action::PathAction;
use crate::error::MockError;

/// 404 for an `:action` suffix on a control route
///
/// Applied with `route_layer`, so `/_control/shutdown:now` is not mistaken
/// for `/_control/shutdown`.
pub async fn reject_action(request: Request, next: Next) -> Response {
    if let Some(action) = request.extensions().get::<PathAction>() {
        let path = format!("{}:{}", request.uri().path(), action.as_str());
        debug!(path = %path, "Action suffix on a plain route");
        return MockError::NotFound(path).into_response();
    }

    next.run(request).await
}
