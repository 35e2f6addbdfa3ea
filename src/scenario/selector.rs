//! Scenario selector extraction
//!
//! Clients under test put the scenario key wherever their provider puts the
//! credential, so the key is read from the credential slots in a fixed order:
//! `Authorization` (bearer prefix stripped), then `x-api-key`, then `?key=`.

use std::fmt;

use axum::http::{header, HeaderMap};
use serde::Serialize;

/// Prefix stripped from the `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Header used by Anthropic-style clients
pub const API_KEY_HEADER: &str = "x-api-key";

/// Query parameter used by Gemini-style clients
pub const KEY_QUERY_PARAM: &str = "key";

/// Opaque, case-sensitive scenario token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ScenarioKey(String);

impl ScenarioKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the scenario key for one request
///
/// Returns the first non-empty candidate. `None` is not an error; it simply
/// matches no scenario.
pub fn extract_selector(headers: &HeaderMap, query: Option<&str>) -> Option<ScenarioKey> {
    from_authorization(headers)
        .or_else(|| from_api_key(headers))
        .or_else(|| query.and_then(from_query))
        .map(ScenarioKey::new)
}

fn from_authorization(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
    non_empty(token)
}

fn from_api_key(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(API_KEY_HEADER)?.to_str().ok()?;
    non_empty(value)
}

fn from_query(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(name, _)| name == KEY_QUERY_PARAM)
        .find_map(|(_, value)| non_empty(&value))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
