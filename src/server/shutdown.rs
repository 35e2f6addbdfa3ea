//! Signal handling
//!
//! SIGINT and SIGTERM end the process the same way `/_control/shutdown`
//! does, minus the delay. There is no connection draining: in-flight
//! streams are cut off mid-frame.

use std::io;

use tracing::{info, warn};

use super::state::AppState;
use crate::lifecycle::ProcessStatus;

/// Wait for SIGINT (Ctrl+C) or SIGTERM and return its name
pub async fn shutdown_signal() -> io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|_| "SIGINT"),
            _ = terminate.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|_| "Ctrl+C")
    }
}

/// Exit through the process actions once a termination signal arrives
pub fn spawn_signal_watcher(state: AppState) {
    tokio::spawn(async move {
        match shutdown_signal().await {
            Ok(signal) => {
                info!(signal, pid = state.process.pid(), "Received signal, shutting down");
                state.process.force(ProcessStatus::ShuttingDown);
                state.actions.shutdown();
            }
            Err(e) => warn!(error = %e, "Failed to install signal handlers"),
        }
    });
}
