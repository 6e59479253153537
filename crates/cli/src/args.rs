//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Split the trailing command line into program and arguments.
//!
//! Non-responsibilities:
//! - Does not resolve the env file path (see `dotexec_config::resolve_env_file`).
//! - Does not launch anything (see `launch` module).

use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dotexec")]
#[command(about = "Load a .env file into the environment, then exec a command", long_about = None)]
#[command(version)]
#[command(
    after_help = "Environment:\n  DOTEXEC_FILE      Env file path when --file is not given\n  DOTENV_PATH       Fallback env file path\n  DOTENV_DISABLED   Set to 1 or true to skip loading\n  DOTEXEC_LOG       Log filter (default: warn)\n\nExamples:\n  dotexec node server.js\n  dotexec -f config/prod.env ./migrate --dry-run\n  DOTEXEC_FILE=.env.local dotexec env\n"
)]
pub struct Cli {
    /// Env file to load (default: $DOTEXEC_FILE, then $DOTENV_PATH, then .env)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Command to run, followed by its arguments (passed through unchanged)
    #[arg(
        value_name = "COMMAND",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// The program to launch and its arguments.
    pub fn command_line(&self) -> (&OsStr, &[OsString]) {
        match self.command.split_first() {
            Some((program, args)) => (program.as_os_str(), args),
            // clap enforces `required = true`
            None => (OsStr::new(""), &[]),
        }
    }
}
