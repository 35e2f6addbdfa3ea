//! Common test utilities for integration tests
//!
//! Provides test server spawning, a recording stand-in for the process
//! actions, and assertions.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use parking_lot::Mutex;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::oneshot;

use dp_mock_server::{
    config::MockConfig,
    lifecycle::ProcessActions,
    server::{create_app, AppState},
};

/// Records restart/shutdown calls instead of acting on the test process
#[derive(Debug, Default)]
pub struct RecordingActions {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingActions {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    /// Poll until at least `count` calls are recorded or `timeout` passes
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<&'static str> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let calls = self.calls();
            if calls.len() >= count || tokio::time::Instant::now() >= deadline {
                return calls;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

impl ProcessActions for RecordingActions {
    fn restart(&self) {
        self.calls.lock().push("restart");
    }

    fn shutdown(&self) {
        self.calls.lock().push("shutdown");
    }
}

/// Test server wrapper
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub base_url: String,
    pub actions: Arc<RecordingActions>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawn a test server with a short control action delay
    pub async fn spawn() -> Self {
        Self::spawn_with_delay(Duration::from_millis(20)).await
    }

    /// Spawn a test server whose control actions fire after `delay`
    pub async fn spawn_with_delay(delay: Duration) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut config = MockConfig::default();
        config.server.port = addr.port();

        let actions = Arc::new(RecordingActions::default());
        let state = AppState::new(&config)
            .with_actions(actions.clone())
            .with_action_delay(delay);
        let app = create_app(state);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app))
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();

        let base_url = format!("http://{}", addr);

        // Wait for the status endpoint
        for _ in 0..50 {
            if client.get(format!("{}/_control/status", base_url)).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        Self {
            addr,
            client,
            base_url,
            actions,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the full URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a GET request
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// Send a GET request with a bearer token
    pub async fn get_with_key(&self, path: &str, key: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .bearer_auth(key)
            .send()
            .await
            .unwrap()
    }

    /// Send a POST request with an empty JSON object
    pub async fn post(&self, path: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap()
    }

    /// Send a POST request with a bearer token
    pub async fn post_with_key(&self, path: &str, key: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .bearer_auth(key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap()
    }

    /// Send a POST request with the key in `x-api-key`
    pub async fn post_with_api_key(&self, path: &str, key: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("x-api-key", key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Assert response status
pub fn assert_status(response: &reqwest::Response, expected: u16) {
    assert_eq!(
        response.status().as_u16(),
        expected,
        "Expected status {}, got {}",
        expected,
        response.status()
    );
}

/// Assert the response content type starts with `expected`
pub fn assert_content_type(response: &reqwest::Response, expected: &str) {
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with(expected),
        "Expected content-type {}, got {}",
        expected,
        content_type
    );
}

/// Read the body as JSON
pub async fn json_body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_server() {
        let server = TestServer::spawn().await;
        let response = server.get("/_control/status").await;
        assert_eq!(response.status().as_u16(), 200);
    }

    #[test]
    fn test_recording_actions() {
        let actions = RecordingActions::default();
        actions.restart();
        actions.shutdown();
        assert_eq!(actions.calls(), vec!["restart", "shutdown"]);
    }
}
