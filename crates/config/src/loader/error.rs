//! Error types for env file loading.
//!
//! Responsibilities:
//! - Define error variants for reading, parsing, and applying an env file.
//! - Provide conversion from the per-stage errors into `DotenvError`.
//!
//! Invariants:
//! - All variants include the file path or key needed to locate the problem.
//! - No variant ever includes raw value bytes from the file, to prevent secret leakage.

use std::path::PathBuf;
use thiserror::Error;

use crate::apply::ApplyError;
use crate::parser::ParseError;

/// Failure to bring an env file into memory.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Env file {} is too large ({size} bytes, limit is {limit} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Failed to read env file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure between locating an env file and applying its assignments.
#[derive(Error, Debug)]
pub enum DotenvError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// SAFETY: `ParseError` only carries the key, offset, and line, never the value.
    #[error("Failed to parse env file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Apply(#[from] ApplyError),
}
