//! Centralized constants for the dotexec workspace.
//!
//! Environment variable names and limits live here so the CLI, the loader,
//! and the tests agree on them.

// =============================================================================
// Env File Location
// =============================================================================

/// File loaded from the working directory when no path is configured.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Primary variable naming the env file path.
pub const ENV_FILE_VAR: &str = "DOTEXEC_FILE";

/// Fallback variable naming the env file path, checked after [`ENV_FILE_VAR`].
pub const FALLBACK_ENV_FILE_VAR: &str = "DOTENV_PATH";

/// Set to `1` or `true` to skip env file loading entirely.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Limits
// =============================================================================

/// Largest env file accepted, in bytes (1 MiB).
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// Logging
// =============================================================================

/// Variable holding the `tracing` filter directives for the CLI.
pub const LOG_FILTER_VAR: &str = "DOTEXEC_LOG";

/// Filter used when [`LOG_FILTER_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
