//! Tests for env file loading.
//!
//! Invariants:
//! - Tests that read or write process env vars are `#[serial]`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

pub mod dotenv_tests;
