//! SDK Configuration

use std::time::Duration;

/// Default base URL of a local mock server
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Control client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the mock server
    pub base_url: String,

    /// Whole-request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(5),
            user_agent: format!("dp-mock-control/{}", crate::VERSION),
        }
    }
}

impl ClientConfig {
    /// Create a new client configuration with the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
