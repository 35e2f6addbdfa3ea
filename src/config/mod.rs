//! Configuration module for the mock server
//!
//! The mock has deliberately few knobs: where to listen and whether to detach
//! into the background. Values come from defaults, then environment variables,
//! then CLI flags. Nothing is read from or written to disk.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

use crate::error::{MockError, MockResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Listener configuration
    pub server: ServerConfig,
    /// Foreground or daemon
    pub mode: RunMode,
    /// Logging settings
    pub telemetry: TelemetryConfig,
}

impl MockConfig {
    /// Load configuration with environment variable overrides
    pub fn from_env() -> MockResult<Self> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("DP_MOCK_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| MockError::Config(format!("Invalid port number: {}", port)))?;
        }

        if let Ok(host) = std::env::var("DP_MOCK_HOST") {
            config.server.host = host;
        }

        if let Ok(val) = std::env::var("DP_MOCK_DAEMON") {
            if matches!(val.as_str(), "1" | "true" | "yes") {
                config.mode = RunMode::Daemon;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> MockResult<()> {
        self.server.validate()?;

        if self.mode == RunMode::Daemon && !cfg!(unix) {
            return Err(MockError::Config(
                "Daemon mode is only supported on Unix; run in the foreground".to_string(),
            ));
        }

        Ok(())
    }
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: crate::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> MockResult<()> {
        if self.port == 0 {
            return Err(MockError::Validation {
                message: "Port cannot be 0".to_string(),
                param: Some("server.port".to_string()),
            });
        }
        self.socket_addr().map(|_| ())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> MockResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| MockError::Validation {
                message: format!("Invalid listen address {}:{}", self.host, self.port),
                param: Some("server.host".to_string()),
            })
    }
}

/// How the server process runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Foreground,
    Daemon,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Foreground => write!(f, "foreground"),
            Self::Daemon => write!(f, "daemon"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable logging
    pub enabled: bool,
    /// Log level
    pub log_level: String,
    /// Enable JSON logging
    pub json_logs: bool,
    /// Service name attached to the startup log line
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "dp-mock-server".to_string(),
        }
    }
}
