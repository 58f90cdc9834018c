//! `bibliotheca`
//!
//! Non-interactive shell around `bibliotheca_core`: reads its configuration from the command
//! line and the environment, loads the library, runs one command and saves when the command
//! changed anything.
use crate::cli::Cli;
use crate::state::AppState;
use anyhow::Error;
use clap::Parser as _;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};
/// Command-line definition
mod cli;
/// Subcommand implementations
mod commands;
/// Error types
mod errors;
/// App state management
mod state;

#[allow(
    clippy::missing_inline_in_public_items,
    reason = "Executed once per run, never across crate boundaries"
)]
#[allow(
    clippy::print_stderr,
    reason = "Tracing might not be available here if run_safe() failed before its initialization"
)]
#[must_use]
pub fn run() -> ExitCode {
    match run_safe() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Encapsulated run function that allows returning errors instead of panicking on `Err` or
/// `None` variants.
#[allow(clippy::print_stdout, reason = "Command output is meant for the terminal")]
fn run_safe() -> Result<(), Error> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("Failed to install logging: {error}"))?;

    let span = tracing::info_span!("command", name = ?cli.command, format = %cli.format);
    let _entered = span.enter();
    log::debug!("Using data directory {}", cli.data_dir.display());

    let mut state = AppState::open(&cli.data_dir, cli.format)?;
    let output = commands::execute(&mut state, cli.command)?;
    println!("{output}");
    Ok(())
}
