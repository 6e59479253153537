//! dotexec - load a `.env` file into the environment, then exec a command.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Load, parse, and apply the env file via `dotexec-config`.
//! - Replace this process with the target command.
//!
//! Does NOT handle:
//! - Env file syntax (see `dotexec_config::parser`).
//!
//! Invariants:
//! - The env file is parsed completely before any variable is set.
//! - Any failure exits with status 1 and a diagnostic on stderr.
//! - Logs go to stderr so the launched command owns stdout.
//! - No threads are spawned, so writing the process environment is sound.

mod args;
mod error;
mod launch;

use std::convert::Infallible;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use clap::error::ErrorKind;
use dotexec_config::constants::{DEFAULT_LOG_FILTER, LOG_FILTER_VAR};
use dotexec_config::{DotenvLoader, LoadReport, ProcessEnvironment};
use error::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors exit 1 like every other failure, not clap's default 2.
            let _ = e.print();
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    };

    init_logging();

    let exit_code = match run(&cli) {
        Ok(never) => match never {},
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::GeneralError
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<Infallible> {
    let mut loader = DotenvLoader::new();
    if let Some(ref path) = cli.file {
        loader = loader.with_path(path);
    }

    // SAFETY: dotexec is single-threaded; nothing else reads or writes the
    // environment while it is being populated.
    let mut env = unsafe { ProcessEnvironment::new() };

    match loader
        .load_into(&mut env)
        .context("Failed to load environment")?
    {
        LoadReport::Disabled => {}
        LoadReport::Missing { path } => {
            tracing::debug!(path = %path.display(), "no env file, using inherited environment");
        }
        LoadReport::Applied { path, count } => {
            tracing::info!(path = %path.display(), count, "loaded env file");
        }
    }

    let (program, args) = cli.command_line();
    Err(launch::exec(program, args).into())
}
