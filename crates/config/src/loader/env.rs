//! Locating the env file from CLI input and environment variables.
//!
//! Responsibilities:
//! - Resolve the env file path: explicit path, `DOTEXEC_FILE`, `DOTENV_PATH`, then `.env`.
//! - Honor the `DOTENV_DISABLED` gate.
//! - Provide helpers for reading env vars with empty/whitespace filtering.
//!
//! Does NOT handle:
//! - Reading the file (see file.rs).
//! - Writing variables into the environment (see `crate::apply`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Path variables are read as OS strings, so non-UTF-8 paths are honored.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_ENV_FILE, DOTENV_DISABLED_VAR, ENV_FILE_VAR, FALLBACK_ENV_FILE_VAR,
};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Read a path-valued environment variable as an OS string.
///
/// Unset, empty, and whitespace-only values return None. UTF-8 values are
/// trimmed; other values are returned unchanged.
pub fn env_path_or_none(key: &str) -> Option<PathBuf> {
    let raw = std::env::var_os(key)?;
    match raw.into_string() {
        Ok(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
        }
        Err(raw) => Some(PathBuf::from(raw)),
    }
}

/// Check if env file loading is disabled via `DOTENV_DISABLED=1|true`.
pub fn dotenv_disabled() -> bool {
    matches!(
        env_var_or_none(DOTENV_DISABLED_VAR).as_deref(),
        Some("true") | Some("1")
    )
}

/// Where a resolved env file path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvFileSource {
    /// Passed directly, e.g. `--file`.
    Explicit,
    /// Read from the named environment variable.
    EnvVar(&'static str),
    /// Nothing configured; the default file name.
    Default,
}

impl fmt::Display for EnvFileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvFileSource::Explicit => f.write_str("command line"),
            EnvFileSource::EnvVar(var) => write!(f, "${}", var),
            EnvFileSource::Default => f.write_str("default"),
        }
    }
}

/// Resolve the env file path in priority order.
///
/// A blank `explicit` path is ignored so the environment variables still apply.
pub fn resolve_env_file(explicit: Option<&Path>) -> (PathBuf, EnvFileSource) {
    if let Some(path) = explicit
        && !path.as_os_str().to_string_lossy().trim().is_empty()
    {
        return (path.to_path_buf(), EnvFileSource::Explicit);
    }

    for var in [ENV_FILE_VAR, FALLBACK_ENV_FILE_VAR] {
        if let Some(path) = env_path_or_none(var) {
            return (path, EnvFileSource::EnvVar(var));
        }
    }

    (PathBuf::from(DEFAULT_ENV_FILE), EnvFileSource::Default)
}
