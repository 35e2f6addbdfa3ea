//! Provider families and their wire shapes
//!
//! Each family has its own error envelope; an Anthropic 401 never looks like
//! an OpenAI 401.

pub mod anthropic;
pub mod google;
pub mod openai;

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;

use crate::scenario::{FileReceipt, StaticResponse};

/// One of the emulated API shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderFamily {
    OpenAI,
    Gemini,
    Anthropic,
}

impl fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Gemini => write!(f, "gemini"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

impl ProviderFamily {
    /// The family's 401 response
    pub fn auth_failure(self) -> StaticResponse {
        match self {
            Self::OpenAI => openai::auth_failure(),
            Self::Gemini => google::auth_failure(),
            Self::Anthropic => anthropic::auth_failure(),
        }
    }
}

/// `{"error":{"message":…,"type":…,"code":…}}`
///
/// Gemini-style errors omit `type`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub message: &'static str,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
    pub code: u16,
}

/// Error envelope without a `type` field
pub fn coded_error(message: &'static str, status: StatusCode) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorBody {
            message,
            error_type: None,
            code: status.as_u16(),
        },
    }
}

/// Error envelope with a `type` field
pub fn typed_error(message: &'static str, error_type: &'static str, status: StatusCode) -> ErrorEnvelope {
    ErrorEnvelope {
        error: ErrorBody {
            message,
            error_type: Some(error_type),
            code: status.as_u16(),
        },
    }
}

/// Files API object returned for an accepted upload
#[derive(Debug, Clone, Serialize)]
pub struct FileObject {
    pub id: &'static str,
    pub filename: &'static str,
    pub purpose: &'static str,
    pub bytes: u64,
}

impl FileObject {
    pub fn new(receipt: &FileReceipt, bytes: u64) -> Self {
        Self {
            id: receipt.id,
            filename: receipt.filename,
            purpose: receipt.purpose,
            bytes,
        }
    }
}

/// Body returned when no scenario matched
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioMiss {
    pub error: String,
}

/// The fixed 400 response for an endpoint whose selector matched nothing
pub fn no_scenario(label: &str) -> StaticResponse {
    StaticResponse::json(
        StatusCode::BAD_REQUEST,
        &ScenarioMiss {
            error: format!("No test scenario triggered for {} endpoint", label),
        },
    )
}
