//! Detaching into the background

use crate::error::{MockError, MockResult};

/// Detach from the controlling terminal
///
/// Forks twice with a new session in between, changes to `/`, clears the
/// umask and points stdin/stdout/stderr at `/dev/null`. Must run before the
/// Tokio runtime is built; only the final descendant returns `Ok`.
#[cfg(unix)]
pub fn daemonize() -> MockResult<()> {
    daemonize::Daemonize::new()
        .working_directory("/")
        .umask(0o000u32)
        .start()
        .map_err(|e| MockError::Daemonize(e.to_string()))
}

#[cfg(not(unix))]
pub fn daemonize() -> MockResult<()> {
    Err(MockError::Daemonize(
        "daemon mode requires a Unix platform".to_string(),
    ))
}
