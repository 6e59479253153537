//! Tests for `DotenvLoader` end to end: resolve, read, parse, apply.
//!
//! Invariants / Assumptions:
//! - Most tests pass an explicit path and apply into a `BTreeMap`, so they
//!   never touch process-global state.
//! - Tests that rely on env var resolution or `DOTENV_DISABLED` are `#[serial]`.
//! - Error messages must never contain secret values from env files.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

use serial_test::serial;
use tempfile::TempDir;

use crate::constants::{DOTENV_DISABLED_VAR, ENV_FILE_VAR, FALLBACK_ENV_FILE_VAR};
use crate::loader::builder::{DotenvLoader, LoadReport};
use crate::loader::error::{DotenvError, LoadError};
use crate::parser::ParseErrorKind;

type MemoryEnv = BTreeMap<OsString, OsString>;

fn get<'a>(env: &'a MemoryEnv, key: &str) -> Option<&'a str> {
    env.get(OsStr::new(key)).and_then(|v| v.to_str())
}

fn write_env(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, contents).unwrap();
    path
}

fn loader_for(path: &Path) -> DotenvLoader {
    DotenvLoader::new().with_path(path).ignore_disabled()
}

#[test]
fn test_missing_file_is_ok() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    let mut env = MemoryEnv::new();

    let report = loader_for(&path).load_into(&mut env).unwrap();

    assert_eq!(report, LoadReport::Missing { path });
    assert!(env.is_empty());
}

#[test]
fn test_valid_file_is_applied_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(
        &temp_dir,
        "# database\nDATABASE_URL=postgres://localhost/app\nMODE='dev'\nMODE=prod # override\n",
    );
    let mut env = MemoryEnv::new();

    let report = loader_for(&path).load_into(&mut env).unwrap();

    assert_eq!(report, LoadReport::Applied { path, count: 3 });
    assert_eq!(
        get(&env, "DATABASE_URL"),
        Some("postgres://localhost/app")
    );
    assert_eq!(get(&env, "MODE"), Some("prod"));
}

#[test]
fn test_comment_only_file_applies_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "# nothing here\n\n# still nothing\n");
    let mut env = MemoryEnv::new();

    let report = loader_for(&path).load_into(&mut env).unwrap();

    assert_eq!(report, LoadReport::Applied { path, count: 0 });
    assert!(env.is_empty());
}

#[test]
fn test_non_utf8_comment_does_not_block_loading() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, b"# caf\xe9 settings\nA=1\n").unwrap();
    let mut env = MemoryEnv::new();

    let report = loader_for(&path).load_into(&mut env).unwrap();

    assert_eq!(report, LoadReport::Applied { path, count: 1 });
    assert_eq!(get(&env, "A"), Some("1"));
}

#[test]
fn test_parse_error_applies_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "GOOD=1\nINVALID_LINE_WITHOUT_EQUALS\n");
    let mut env = MemoryEnv::new();

    let err = loader_for(&path).load_into(&mut env).unwrap_err();

    match err {
        DotenvError::Parse { source, .. } => {
            assert_eq!(source.kind(), ParseErrorKind::MissingEquals);
            assert_eq!(source.key(), Some("INVALID_LINE_WITHOUT_EQUALS"));
            assert_eq!(source.line(), 2);
        }
        other => panic!("expected Parse error, got {}", other),
    }
    assert!(env.is_empty(), "a failed parse must not apply anything");
}

#[test]
fn test_parse_error_does_not_leak_secrets() {
    let temp_dir = TempDir::new().unwrap();
    let secret_value = "supersecret_token_12345";
    let path = write_env(
        &temp_dir,
        &format!("API_TOKEN=\"{}\"trailing\n", secret_value),
    );

    let err = loader_for(&path)
        .load_into(&mut MemoryEnv::new())
        .unwrap_err();
    let message = render_chain(&err);

    assert!(
        !message.contains(secret_value),
        "Error message should NOT contain the secret value: {}",
        message
    );
    assert!(message.contains("API_TOKEN"), "Error should name the key: {}", message);
    assert!(message.contains(".env"), "Error should name the file: {}", message);
}

/// Render an error with its source chain, the way the CLI prints it.
fn render_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[test]
fn test_too_large_file_is_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "A=0123456789\n");

    let err = loader_for(&path)
        .with_max_size(4)
        .load_into(&mut MemoryEnv::new())
        .unwrap_err();

    assert!(matches!(
        err,
        DotenvError::Load(LoadError::TooLarge { limit: 4, .. })
    ));
}

#[test]
fn test_rejected_variable_is_apply_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "A=1\nB=\"x\0y\"\n");
    let mut env = MemoryEnv::new();

    let err = loader_for(&path).load_into(&mut env).unwrap_err();

    assert!(matches!(err, DotenvError::Apply(_)));
    assert_eq!(get(&env, "A"), Some("1"));
}

#[test]
fn test_read_returns_assignments_without_applying() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "A=1\nB=2\n");

    let (read_path, assignments) = loader_for(&path).read().unwrap().unwrap();

    assert_eq!(read_path, path);
    let keys: Vec<&OsStr> = assignments.iter().map(|a| a.key()).collect();
    assert_eq!(keys, ["A", "B"]);
}

#[test]
#[serial]
fn test_dotenv_disabled_skips_invalid_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "INVALID_LINE_WITHOUT_EQUALS");

    temp_env::with_var(DOTENV_DISABLED_VAR, Some("1"), || {
        let mut env = MemoryEnv::new();
        let report = DotenvLoader::new()
            .with_path(&path)
            .load_into(&mut env)
            .unwrap();
        assert_eq!(report, LoadReport::Disabled);
        assert!(env.is_empty());
    });
}

#[test]
#[serial]
fn test_dotenv_disabled_true_also_skips() {
    temp_env::with_var(DOTENV_DISABLED_VAR, Some("true"), || {
        assert!(DotenvLoader::new().read().unwrap().is_none());
    });
}

#[test]
#[serial]
fn test_path_from_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_env(&temp_dir, "FROM_VAR=yes\n");

    temp_env::with_vars(
        [
            (DOTENV_DISABLED_VAR, None),
            (ENV_FILE_VAR, Some(path.to_str().unwrap())),
            (FALLBACK_ENV_FILE_VAR, Some("/definitely/not/here.env")),
        ],
        || {
            let mut env = MemoryEnv::new();
            let report = DotenvLoader::new().load_into(&mut env).unwrap();
            assert_eq!(report, LoadReport::Applied { path: path.clone(), count: 1 });
            assert_eq!(get(&env, "FROM_VAR"), Some("yes"));
        },
    );
}
