//! SDK Client

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::{ClientConfig, ControlAck, ControlError, ControlResult, ControlStatus};

/// Control plane client
///
/// One request per call; no retries. A restart or shutdown acknowledgement
/// means the command was accepted, not that it has happened yet.
#[derive(Clone, Debug)]
pub struct ControlClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ControlClient {
    /// Create a new client with the given base URL
    pub fn new(base_url: impl Into<String>) -> ControlResult<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    /// Create a new client with the given configuration
    pub fn with_config(config: ClientConfig) -> ControlResult<Self> {
        let mut base_url = Url::parse(&config.base_url)?;
        // Control paths are joined relative to the base, keeping any prefix
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("dp-mock-control")),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(ControlError::Request)?;

        Ok(Self { http, base_url })
    }

    /// GET /_control/status
    pub async fn status(&self) -> ControlResult<ControlStatus> {
        self.send(reqwest::Method::GET, "_control/status").await
    }

    /// POST /_control/restart
    pub async fn restart(&self) -> ControlResult<ControlAck> {
        self.send(reqwest::Method::POST, "_control/restart").await
    }

    /// POST /_control/shutdown
    pub async fn shutdown(&self) -> ControlResult<ControlAck> {
        self.send(reqwest::Method::POST, "_control/shutdown").await
    }

    async fn send<R: DeserializeOwned>(&self, method: reqwest::Method, path: &str) -> ControlResult<R> {
        let url = self.base_url.join(path)?;
        debug!(method = %method, url = %url, "Sending control request");

        let response = self.http.request(method, url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(ControlError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
