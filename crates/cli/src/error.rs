//! CLI exit codes.
//!
//! Invariants:
//! - Every failure (usage, load, parse, environment write, launch) exits with 1.
//! - On success the process image is replaced, so no success code is ever
//!   returned from this binary's own code path on Unix.

/// Structured exit codes for dotexec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - only reachable where exec is emulated by spawn-and-wait.
    #[cfg_attr(unix, allow(dead_code))]
    Success = 0,

    /// General error - any failure before or during launch.
    GeneralError = 1,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}
