//! Env file loader builder.
//!
//! Responsibilities:
//! - Provide a builder-pattern `DotenvLoader` tying together path resolution,
//!   file reading, parsing, and application.
//! - Report what happened (disabled, missing, applied) for logging.
//!
//! Does NOT handle:
//! - Scanning the file contents (delegated to `crate::parser`).
//! - Path resolution rules (delegated to env.rs).
//!
//! Invariants / Assumptions:
//! - The `DOTENV_DISABLED` variable is checked before any file is touched.
//! - The whole file is parsed before anything is applied. A parse error
//!   leaves the environment untouched.

use std::path::{Path, PathBuf};

use super::env::{EnvFileSource, dotenv_disabled, resolve_env_file};
use super::error::DotenvError;
use super::file::read_env_file;
use crate::apply::{Environment, apply};
use crate::constants::MAX_FILE_SIZE;
use crate::parser::{Assignment, parse};

/// Outcome of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// `DOTENV_DISABLED` was set; no file was read.
    Disabled,
    /// The resolved file does not exist. Treated as an empty configuration.
    Missing { path: PathBuf },
    /// The file was read and `count` assignments were applied.
    Applied { path: PathBuf, count: usize },
}

/// Loads an env file and applies it to an [`Environment`].
#[derive(Debug, Clone)]
pub struct DotenvLoader {
    path: Option<PathBuf>,
    max_size: u64,
    respect_disabled: bool,
}

impl Default for DotenvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DotenvLoader {
    /// Create a loader with default path resolution and the 1 MiB size cap.
    pub fn new() -> Self {
        Self {
            path: None,
            max_size: MAX_FILE_SIZE,
            respect_disabled: true,
        }
    }

    /// Load this file instead of consulting `DOTEXEC_FILE`/`DOTENV_PATH`.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the size cap (primarily for testing).
    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Ignore `DOTENV_DISABLED` (primarily for testing).
    pub fn ignore_disabled(mut self) -> Self {
        self.respect_disabled = false;
        self
    }

    /// The path this loader would read, and where it came from.
    pub fn resolve(&self) -> (PathBuf, EnvFileSource) {
        resolve_env_file(self.path.as_deref())
    }

    fn is_disabled(&self) -> bool {
        self.respect_disabled && dotenv_disabled()
    }

    /// Read and parse the env file without applying it.
    ///
    /// Returns `Ok(None)` when loading is disabled or the file is missing.
    ///
    /// # Errors
    ///
    /// - `DotenvError::Load` if the file is too large or cannot be read.
    /// - `DotenvError::Parse` if the file has invalid syntax.
    pub fn read(&self) -> Result<Option<(PathBuf, Vec<Assignment>)>, DotenvError> {
        match self.fetch()? {
            Fetched::Parsed { path, assignments } => Ok(Some((path, assignments))),
            Fetched::Disabled | Fetched::Missing { .. } => Ok(None),
        }
    }

    /// Read, parse, then apply the env file to `env`.
    ///
    /// # Errors
    ///
    /// As [`read`](Self::read), plus `DotenvError::Apply` if `env` rejects a
    /// variable. Variables before the rejected one remain set.
    pub fn load_into<E>(&self, env: &mut E) -> Result<LoadReport, DotenvError>
    where
        E: Environment + ?Sized,
    {
        match self.fetch()? {
            Fetched::Disabled => Ok(LoadReport::Disabled),
            Fetched::Missing { path } => Ok(LoadReport::Missing { path }),
            Fetched::Parsed { path, assignments } => {
                let count = apply(assignments, env)?;
                tracing::debug!(path = %path.display(), count, "applied env file");
                Ok(LoadReport::Applied { path, count })
            }
        }
    }

    fn fetch(&self) -> Result<Fetched, DotenvError> {
        if self.is_disabled() {
            tracing::info!("env file loading disabled via DOTENV_DISABLED");
            return Ok(Fetched::Disabled);
        }

        let (path, source) = self.resolve();
        tracing::debug!(path = %path.display(), %source, "resolved env file");

        let Some(buffer) = read_env_file(&path, self.max_size)? else {
            return Ok(Fetched::Missing { path });
        };
        let assignments = parse_file(&path, &buffer)?;
        Ok(Fetched::Parsed { path, assignments })
    }
}

enum Fetched {
    Disabled,
    Missing { path: PathBuf },
    Parsed { path: PathBuf, assignments: Vec<Assignment> },
}

fn parse_file(path: &Path, buffer: &[u8]) -> Result<Vec<Assignment>, DotenvError> {
    parse(buffer).map_err(|source| DotenvError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
