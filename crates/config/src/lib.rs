//! Env file loading for dotexec.
//!
//! This crate parses `KEY=VALUE` env files and applies them to an
//! environment, keeping the parser free of I/O so it can be tested on its own.

pub mod apply;
pub mod constants;
mod loader;
pub mod parser;

pub use apply::{ApplyError, Environment, ProcessEnvironment, apply};
pub use loader::{
    DotenvError, DotenvLoader, EnvFileSource, LoadError, LoadReport, dotenv_disabled,
    env_path_or_none, env_var_or_none, read_env_file, resolve_env_file,
};
pub use parser::{Assignment, ParseError, ParseErrorKind, Parser, parse, parse_str};
