//! Reading an env file into memory.
//!
//! A missing file is not an error: it yields `Ok(None)` and the caller treats
//! it as an empty configuration. Every other I/O failure is fatal.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use super::error::LoadError;

/// Read `path` fully, refusing files larger than `limit` bytes.
///
/// The size is checked against file metadata first, and the read itself is
/// capped at `limit + 1` bytes so a file that grows after the check is still
/// rejected.
pub fn read_env_file(path: &Path, limit: u64) -> Result<Option<Vec<u8>>, LoadError> {
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "env file not found");
            return Ok(None);
        }
        Err(e) => return Err(io_error(e)),
    };

    let size = file.metadata().map_err(io_error)?.len();
    if size > limit {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit,
        });
    }

    let mut buffer = Vec::with_capacity(size as usize);
    file.take(limit.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(io_error)?;

    let read = buffer.len() as u64;
    if read > limit {
        return Err(LoadError::TooLarge {
            path: path.to_path_buf(),
            size: read,
            limit,
        });
    }

    tracing::debug!(path = %path.display(), bytes = read, "read env file");
    Ok(Some(buffer))
}
