//! `:action` path suffixes
//!
//! Gemini-style URLs put the operation after a colon in the last segment
//! (`/v1/models/gemini-pro:generateContent`, `/v1/files:upload`). The suffix
//! is split off before routing so the router only ever sees plain paths; the
//! action travels in the request extensions.

use axum::extract::Request;
use axum::http::uri::{PathAndQuery, Uri};

/// The `:action` suffix removed from the request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathAction(pub String);

impl PathAction {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Split `base:action` in the final path segment
///
/// A leading colon (`/v1/:x`) or an empty action (`/v1/files:`) is not an
/// action suffix.
pub fn split_action(path: &str) -> Option<(&str, &str)> {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    let colon = segment_start + path[segment_start..].find(':')?;
    if colon == segment_start || colon + 1 == path.len() {
        return None;
    }
    Some((&path[..colon], &path[colon + 1..]))
}

/// Rewrite the request URI without its action suffix
pub fn split_action_suffix(mut request: Request) -> Request {
    let (rewritten, action) = {
        let uri = request.uri();
        let Some((base, action)) = split_action(uri.path()) else {
            return request;
        };
        let path_and_query = match uri.query() {
            Some(query) => format!("{}?{}", base, query),
            None => base.to_string(),
        };
        (rebuild_uri(uri, &path_and_query), PathAction(action.to_string()))
    };

    if let Some(uri) = rewritten {
        *request.uri_mut() = uri;
        request.extensions_mut().insert(action);
    }
    request
}

fn rebuild_uri(uri: &Uri, path_and_query: &str) -> Option<Uri> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>().ok()?);
    Uri::from_parts(parts).ok()
}
