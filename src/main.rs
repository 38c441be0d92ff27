//! ytmusic-dl - Search YouTube Music and download audio.
//!
//! Every invocation prints a single JSON envelope on stdout and exits with
//! status 0 on success or 1 on any failure. Logs go to stderr and are
//! controlled with `RUST_LOG` (default `ytmusic_dl=warn`).

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod innertube;
#[cfg(test)]
pub mod test_utils;

use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    // Initialize logging (stderr only, stdout carries the JSON envelope)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ytmusic_dl=warn")),
        )
        .init();

    let args = match cli::Cli::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let rendered = e.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            cli::output::print(&cli::output::error(message));
            return ExitCode::FAILURE;
        }
    };

    let config = config::load();

    match cli::run_command(&args, &config) {
        Ok(envelope) => {
            cli::output::print(&envelope);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            cli::output::print(&cli::output::failure(&e));
            ExitCode::FAILURE
        }
    }
}
