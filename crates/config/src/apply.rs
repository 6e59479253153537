//! Writing parsed assignments into an environment.
//!
//! Responsibilities:
//! - Define the `Environment` seam the parsed sequence is fed into.
//! - Validate names and values before they reach `std::env::set_var`,
//!   which would otherwise panic on them.
//!
//! Invariants:
//! - Assignments are applied in file order; a later key overwrites an earlier one.
//! - The first failure stops application. Nothing after it is written.

use std::collections::{BTreeMap, HashMap};
use std::ffi::{OsStr, OsString};

use thiserror::Error;

use crate::parser::Assignment;

/// The OS would refuse (or `std` would panic on) this variable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    #[error("Unable to set environment variable \"{key}\": name {reason}")]
    InvalidName { key: String, reason: &'static str },

    #[error("Unable to set environment variable \"{key}\": value contains a NUL byte")]
    InvalidValue { key: String },
}

/// Check that `key=value` can be stored in a process environment.
pub fn validate(key: &OsStr, value: &OsStr) -> Result<(), ApplyError> {
    let name = key.as_encoded_bytes();
    let reason = if name.is_empty() {
        Some("is empty")
    } else if name.contains(&b'=') {
        Some("contains '='")
    } else if name.contains(&0) {
        Some("contains a NUL byte")
    } else {
        None
    };
    if let Some(reason) = reason {
        return Err(ApplyError::InvalidName {
            key: key.to_string_lossy().escape_debug().to_string(),
            reason,
        });
    }
    if value.as_encoded_bytes().contains(&0) {
        return Err(ApplyError::InvalidValue {
            key: key.to_string_lossy().into_owned(),
        });
    }
    Ok(())
}

/// A writable key/value environment.
pub trait Environment {
    /// Set `key` to `value`, replacing any existing entry.
    fn set(&mut self, key: &OsStr, value: &OsStr) -> Result<(), ApplyError>;
}

/// The process-wide environment inherited by launched commands.
#[derive(Debug)]
pub struct ProcessEnvironment {
    _private: (),
}

impl ProcessEnvironment {
    /// # Safety
    ///
    /// Writing the process environment is only sound while no other thread
    /// reads or writes it. The caller must hold that guarantee for as long as
    /// the returned value is used.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl Environment for ProcessEnvironment {
    fn set(&mut self, key: &OsStr, value: &OsStr) -> Result<(), ApplyError> {
        validate(key, value)?;
        // SAFETY: upheld by the caller of `ProcessEnvironment::new`.
        unsafe {
            std::env::set_var(key, value);
        }
        Ok(())
    }
}

impl Environment for HashMap<OsString, OsString> {
    fn set(&mut self, key: &OsStr, value: &OsStr) -> Result<(), ApplyError> {
        validate(key, value)?;
        self.insert(key.to_os_string(), value.to_os_string());
        Ok(())
    }
}

impl Environment for BTreeMap<OsString, OsString> {
    fn set(&mut self, key: &OsStr, value: &OsStr) -> Result<(), ApplyError> {
        validate(key, value)?;
        self.insert(key.to_os_string(), value.to_os_string());
        Ok(())
    }
}

/// Apply `assignments` in order. Returns how many were written.
pub fn apply<I, E>(assignments: I, env: &mut E) -> Result<usize, ApplyError>
where
    I: IntoIterator<Item = Assignment>,
    E: Environment + ?Sized,
{
    let mut count = 0;
    for assignment in assignments {
        env.set(assignment.key(), assignment.value())?;
        tracing::debug!(key = %assignment.key().to_string_lossy(), "set environment variable");
        count += 1;
    }
    Ok(count)
}
