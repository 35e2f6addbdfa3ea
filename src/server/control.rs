//! Control plane handlers
//!
//! `status` is a pure read. `restart` and `shutdown` flip the process status,
//! answer immediately, and act from a spawned task once the response has had
//! time to reach the caller.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::AppState;
use crate::config::RunMode;
use crate::error::MockError;
use crate::lifecycle::{ProcessActions, ProcessStatus};
use crate::scenario::Endpoint;

/// Control routes, listed alongside the provider routes in `status`
pub const CONTROL_ROUTES: [&str; 3] = [
    "GET /_control/status",
    "POST /_control/restart",
    "POST /_control/shutdown",
];

/// Body of `GET /_control/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlStatus {
    pub status: ProcessStatus,
    pub version: String,
    pub pid: u32,
    pub mode: RunMode,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub endpoints: Vec<String>,
}

/// Body acknowledging a restart or shutdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlAck {
    pub status: ProcessStatus,
    pub message: String,
    pub pid: u32,
}

/// Every routed `METHOD path`, provider endpoints first
pub fn endpoint_list() -> Vec<String> {
    Endpoint::ALL
        .iter()
        .flat_map(|ep| ep.paths().iter().map(move |path| format!("{} {}", ep.method(), path)))
        .chain(CONTROL_ROUTES.iter().map(|r| r.to_string()))
        .collect()
}

/// GET /_control/status
pub async fn control_status(State(state): State<AppState>) -> Json<ControlStatus> {
    let process = &state.process;
    Json(ControlStatus {
        status: process.status(),
        version: crate::VERSION.to_string(),
        pid: process.pid(),
        mode: process.mode(),
        uptime_seconds: process.uptime().as_secs(),
        started_at: process.started_at(),
        endpoints: endpoint_list(),
    })
}

/// POST /_control/restart
pub async fn control_restart(State(state): State<AppState>) -> Result<Json<ControlAck>, MockError> {
    state.process.begin(ProcessStatus::Restarting)?;
    info!(
        pid = state.process.pid(),
        delay_ms = state.action_delay.as_millis() as u64,
        "Restart requested"
    );

    schedule(state.actions.clone(), state.action_delay, |actions| actions.restart());

    Ok(Json(ControlAck {
        status: ProcessStatus::Restarting,
        message: "Server restarting".to_string(),
        pid: state.process.pid(),
    }))
}

/// POST /_control/shutdown
pub async fn control_shutdown(State(state): State<AppState>) -> Result<Json<ControlAck>, MockError> {
    state.process.begin(ProcessStatus::ShuttingDown)?;
    info!(
        pid = state.process.pid(),
        delay_ms = state.action_delay.as_millis() as u64,
        "Shutdown requested"
    );

    schedule(state.actions.clone(), state.action_delay, |actions| actions.shutdown());

    Ok(Json(ControlAck {
        status: ProcessStatus::ShuttingDown,
        message: "Server shutting down".to_string(),
        pid: state.process.pid(),
    }))
}

/// Run `action` after `delay` on its own task; there is no way to cancel it
fn schedule<F>(actions: Arc<dyn ProcessActions>, delay: Duration, action: F)
where
    F: FnOnce(&dyn ProcessActions) + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        action(actions.as_ref());
    });
}
