//! Process lifecycle
//!
//! Tracks the status reported by the control plane and performs the
//! process-level actions behind it: detaching into the background,
//! re-executing the binary, and exiting.

mod daemon;
mod exec;

pub use daemon::daemonize;
pub use exec::restart_process;

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::RunMode;
use crate::error::{MockError, MockResult};

/// Status reported by `GET /_control/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    Running,
    Restarting,
    ShuttingDown,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Restarting => write!(f, "restarting"),
            Self::ShuttingDown => write!(f, "shutting_down"),
        }
    }
}

/// Identity and status of the running server process
#[derive(Debug)]
pub struct ProcessState {
    pid: u32,
    mode: RunMode,
    status: RwLock<ProcessStatus>,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl ProcessState {
    pub fn new(mode: RunMode) -> Self {
        Self {
            pid: std::process::id(),
            mode,
            status: RwLock::new(ProcessStatus::Running),
            started: Instant::now(),
            started_at: Utc::now(),
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn status(&self) -> ProcessStatus {
        *self.status.read()
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Move from `running` to `next`
    ///
    /// Transitions are one-way: once a restart or shutdown is pending, any
    /// further command is a conflict.
    pub fn begin(&self, next: ProcessStatus) -> MockResult<()> {
        let mut status = self.status.write();
        if *status != ProcessStatus::Running {
            return Err(MockError::Conflict(format!("Server is already {}", *status)));
        }
        *status = next;
        Ok(())
    }

    /// Record a shutdown that did not come through the control plane
    pub fn force(&self, next: ProcessStatus) {
        *self.status.write() = next;
    }
}

/// Process-level side effects of the control plane
///
/// Neither method is expected to return in production; test doubles record
/// the call instead.
pub trait ProcessActions: Send + Sync + 'static {
    /// Replace the process image with a fresh copy of itself
    fn restart(&self);

    /// Terminate the process
    fn shutdown(&self);
}

/// Acts on the real process
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemActions;

impl ProcessActions for SystemActions {
    fn restart(&self) {
        info!(pid = std::process::id(), "Re-executing mock server");
        let err = restart_process();
        warn!(error = %err, "Restart failed, exiting");
        std::process::exit(1);
    }

    fn shutdown(&self) {
        info!(pid = std::process::id(), "Mock server exiting");
        std::process::exit(0);
    }
}
