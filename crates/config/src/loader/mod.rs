//! Env file loading.
//!
//! Responsibilities:
//! - Locate the env file (`--file`, `DOTEXEC_FILE`, `DOTENV_PATH`, `.env`).
//! - Read it into memory with a size cap, treating a missing file as empty.
//! - Provide a builder-pattern `DotenvLoader` that parses and applies it.
//!
//! Does NOT handle:
//! - Scanning file contents (see `crate::parser`).
//! - Launching the target command (handled by the CLI).
//!
//! Invariants / Assumptions:
//! - The `DOTENV_DISABLED` variable is checked before any file is opened.
//! - Files larger than `MAX_FILE_SIZE` are rejected, never truncated.

mod builder;
mod env;
mod error;
mod file;
#[cfg(test)]
mod tests;

pub use builder::{DotenvLoader, LoadReport};
pub use env::{
    EnvFileSource, dotenv_disabled, env_path_or_none, env_var_or_none, resolve_env_file,
};
pub use error::{DotenvError, LoadError};
pub use file::read_env_file;
