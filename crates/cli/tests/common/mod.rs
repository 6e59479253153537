//! Shared test utilities for dotexec integration tests.
//!
//! Invariants / Assumptions:
//! - Every command runs in a fresh temp directory, so a stray `.env` in the
//!   repository never leaks into a test.
//! - Location and gating variables inherited from the host are cleared.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Returns a hermetic `dotexec` command running in `dir`.
pub fn dotexec_cmd(dir: &Path) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dotexec");
    cmd.current_dir(dir);

    // Clear potential host leakage
    cmd.env_remove("DOTEXEC_FILE")
        .env_remove("DOTENV_PATH")
        .env_remove("DOTENV_DISABLED")
        .env_remove("DOTEXEC_LOG");

    cmd
}

/// Create a temp dir containing a `.env` file with `contents`.
#[allow(dead_code)]
pub fn dir_with_env(contents: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".env"), contents).unwrap();
    temp_dir
}
