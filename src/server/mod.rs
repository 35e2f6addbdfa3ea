//! HTTP server implementation
//!
//! Provides the Axum-based HTTP server with the emulated provider endpoints
//! and the `/_control` plane.

mod action;
mod control;
mod handlers;
mod middleware;
mod routes;
mod shutdown;
mod state;
mod streaming;

pub use action::{split_action, split_action_suffix, PathAction};
pub use control::{endpoint_list, ControlAck, ControlStatus, CONTROL_ROUTES};
pub use handlers::dispatch;
pub use routes::*;
pub use shutdown::{shutdown_signal, spawn_signal_watcher};
pub use state::{AppState, CONTROL_ACTION_DELAY};
pub use streaming::{frame_stream, stream_response};

use axum::body::Body;
use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::Router;
use serde::Serialize;
use tower::util::MapRequest;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::MockConfig;
use crate::scenario::Endpoint;

/// The router behind the `:action` suffix rewrite
pub type MockApp = MapRequest<Router, fn(Request) -> Request>;

/// Model id substituted for `{model}` when probing Gemini paths
const PROBE_MODEL: &str = "gemini-pro";

/// Run the mock server until the process exits
pub async fn run_server(config: MockConfig) -> anyhow::Result<()> {
    let state = AppState::new(&config);
    spawn_signal_watcher(state.clone());

    let app = create_app(state.clone());
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        service = %config.telemetry.service_name,
        version = crate::VERSION,
        pid = state.process.pid(),
        mode = %config.mode,
        "Starting mock server on {}",
        addr
    );
    info!("Scenario tables: {}", state.catalog.tables().len());

    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app)).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the router with every route and the fallback
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::openai_routes())
        .merge(routes::anthropic_routes())
        .merge(routes::google_routes())
        .merge(routes::control_routes())
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the servable application: the router behind the suffix rewrite
///
/// The rewrite has to run before routing, so it wraps the router rather than
/// being layered onto it.
pub fn create_app(state: AppState) -> MockApp {
    ServiceBuilder::new()
        .map_request(split_action_suffix as fn(Request) -> Request)
        .service(create_router(state))
}

/// Outcome of probing one route
#[derive(Debug, Clone, Serialize)]
pub struct RouteCheck {
    pub method: String,
    pub path: String,
    pub expected: u16,
    pub actual: u16,
}

impl RouteCheck {
    pub fn passed(&self) -> bool {
        self.expected == self.actual
    }
}

/// Send one selector-less request through every provider path, plus a status
/// probe, without binding a socket
///
/// Provider paths must answer with their 400 "no scenario" body; a 404 or 405
/// means the route table is missing an entry.
pub async fn self_check(state: AppState) -> Vec<RouteCheck> {
    let app = create_app(state);

    let mut probes: Vec<(Method, String, StatusCode)> = Endpoint::ALL
        .iter()
        .flat_map(|ep| {
            ep.paths().iter().map(move |path| {
                (
                    ep.method(),
                    path.replace("{model}", PROBE_MODEL),
                    StatusCode::BAD_REQUEST,
                )
            })
        })
        .collect();
    probes.push((Method::GET, "/_control/status".to_string(), StatusCode::OK));

    let mut checks = Vec::with_capacity(probes.len());
    for (method, path, expected) in probes {
        let actual = match axum::http::Request::builder()
            .method(method.clone())
            .uri(path.as_str())
            .body(Body::empty())
        {
            Ok(request) => {
                let response = tower::ServiceExt::oneshot(app.clone(), request)
                    .await
                    .unwrap_or_else(|never| match never {});
                response.status()
            }
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        checks.push(RouteCheck {
            method: method.to_string(),
            path,
            expected: expected.as_u16(),
            actual: actual.as_u16(),
        });
    }
    checks
}
