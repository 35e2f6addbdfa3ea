//! Restarting in place

use std::process::Command;

use crate::error::MockError;

fn self_command() -> Result<Command, MockError> {
    let exe = std::env::current_exe()
        .map_err(|e| MockError::Exec(format!("cannot locate executable: {}", e)))?;
    let mut command = Command::new(exe);
    command.args(std::env::args_os().skip(1));
    Ok(command)
}

/// Replace the process image with the same binary and arguments
///
/// Only returns if the exec failed.
#[cfg(unix)]
pub fn restart_process() -> MockError {
    use std::os::unix::process::CommandExt;

    match self_command() {
        Ok(mut command) => MockError::Exec(command.exec().to_string()),
        Err(e) => e,
    }
}

/// Spawn a detached copy with the same arguments, then exit
#[cfg(not(unix))]
pub fn restart_process() -> MockError {
    match self_command().and_then(|mut c| c.spawn().map_err(|e| MockError::Exec(e.to_string()))) {
        Ok(_) => std::process::exit(0),
        Err(e) => e,
    }
}
