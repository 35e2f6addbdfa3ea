//! SDK Error Types
//!
//! A failed control call is one of: the server could not be reached, it did
//! not answer in time, or it answered with something other than 200.

use thiserror::Error;

/// Control client error
#[derive(Error, Debug)]
pub enum ControlError {
    /// Nothing accepted the connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// No response within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// The server answered with a non-200 status
    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Any other transport failure
    #[error("Request error: {0}")]
    Request(reqwest::Error),

    /// The 200 body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be parsed or joined
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ControlError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ControlError::Timeout
        } else if e.is_connect() {
            ControlError::Connection(e.to_string())
        } else {
            ControlError::Request(e)
        }
    }
}

/// SDK Result type
pub type ControlResult<T> = Result<T, ControlError>;

impl ControlError {
    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ControlError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A 409: another restart or shutdown is already pending
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}
