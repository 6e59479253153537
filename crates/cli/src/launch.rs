//! Replacing this process with the target command.
//!
//! Responsibilities:
//! - Exec the command with the current (augmented) environment on Unix.
//! - Emulate exec with spawn-and-wait elsewhere, forwarding the exit code.
//!
//! Invariants:
//! - `exec` only returns on failure. The returned error carries the OS error.

use std::ffi::{OsStr, OsString};
use std::process::Command;

use thiserror::Error;

#[derive(Error, Debug)]
#[error("Unable to execute command \"{}\"", .program.to_string_lossy())]
pub struct LaunchError {
    program: OsString,
    #[source]
    source: std::io::Error,
}

/// Replace the current process with `program args...`, searching `PATH`.
#[cfg(unix)]
pub fn exec(program: &OsStr, args: &[OsString]) -> LaunchError {
    use std::os::unix::process::CommandExt;

    tracing::debug!(program = %program.to_string_lossy(), args = args.len(), "exec");
    let source = Command::new(program).args(args).exec();
    LaunchError {
        program: program.to_os_string(),
        source,
    }
}

/// Run `program args...` to completion and exit with its status code.
#[cfg(not(unix))]
pub fn exec(program: &OsStr, args: &[OsString]) -> LaunchError {
    use crate::error::ExitCode;

    tracing::debug!(program = %program.to_string_lossy(), args = args.len(), "spawn");
    match Command::new(program).args(args).status() {
        Ok(status) if status.success() => std::process::exit(ExitCode::Success.as_i32()),
        Ok(status) => {
            std::process::exit(status.code().unwrap_or(ExitCode::GeneralError.as_i32()))
        }
        Err(source) => LaunchError {
            program: program.to_os_string(),
            source,
        },
    }
}
