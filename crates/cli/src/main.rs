//! nestcfg - command-line access to hierarchical configuration files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging to stderr.
//! - Run the selected command and map failures to exit codes.
//!
//! Does NOT handle:
//! - Path resolution or file I/O semantics (see `crates/config`).
//!
//! Invariants:
//! - Logs and errors go to stderr; command output goes to stdout.

mod args;
mod commands;
mod dispatch;
mod error;

use args::Cli;
use clap::Parser;
use error::ExitCodeExt;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = dispatch::run_command(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(e.exit_code().as_i32());
    }
}
