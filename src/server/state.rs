//! Server state management

use std::sync::Arc;
use std::time::Duration;

use crate::config::MockConfig;
use crate::lifecycle::{ProcessActions, ProcessState, SystemActions};
use crate::scenario::{catalog, Catalog};

/// Pause between acknowledging a control command and acting on it
pub const CONTROL_ACTION_DELAY: Duration = Duration::from_millis(500);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: &'static Catalog,
    pub process: Arc<ProcessState>,
    pub actions: Arc<dyn ProcessActions>,
    pub action_delay: Duration,
}

impl AppState {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            catalog: catalog(),
            process: Arc::new(ProcessState::new(config.mode)),
            actions: Arc::new(SystemActions),
            action_delay: CONTROL_ACTION_DELAY,
        }
    }

    /// Replace the process-level actions (restart, exit)
    pub fn with_actions(mut self, actions: Arc<dyn ProcessActions>) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_action_delay(mut self, delay: Duration) -> Self {
        self.action_delay = delay;
        self
    }
}
