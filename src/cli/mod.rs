//! Command-line interface for ytmusic-dl.
//!
//! This module provides the `search`, `suggest` and `download` commands.
//! Every command answers with a single JSON envelope on stdout.

mod commands;
pub mod output;

pub use commands::{Cli, Commands, run_command};
