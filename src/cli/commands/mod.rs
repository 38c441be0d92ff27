//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: Catalog search and search suggestions
//! - `download`: Audio download through yt-dlp

mod download;
mod search;

use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::config::Config;

pub use download::cmd_download;
pub use search::{SearchOptions, cmd_search, cmd_suggest};

/// Search YouTube Music and download audio
#[derive(Parser, Debug)]
#[command(name = "ytmusic-dl", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the YouTube Music catalog
    Search {
        /// Search query (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Restrict results to one kind: albums, artists, playlists,
        /// community_playlists, featured_playlists, songs, videos, profiles,
        /// podcasts, episodes (default from config: songs)
        #[arg(short, long, conflicts_with = "all")]
        filter: Option<String>,
        /// Blended search across all kinds, ignoring the default filter
        #[arg(long)]
        all: bool,
        /// Search your library or uploads instead of the catalog
        #[arg(short, long)]
        scope: Option<String>,
        /// Maximum number of results (default from config: 10)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Don't let the server auto-correct the query spelling
        #[arg(long)]
        ignore_spelling: bool,
    },
    /// Get autocomplete suggestions for a partial query
    Suggest {
        /// Partial query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Include formatting runs (matched part marked bold)
        #[arg(long)]
        detailed: bool,
    },
    /// Download the audio of a song
    Download {
        /// Video id from a search result
        #[arg(allow_hyphen_values = true)]
        video_id: String,
        /// Song title (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
}

/// Run the specified CLI command.
///
/// Returns the success envelope to print.
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<Value> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Search {
            query,
            filter,
            all,
            scope,
            limit,
            ignore_spelling,
        } => {
            let options = SearchOptions {
                words: query,
                filter: filter.as_deref(),
                all: *all,
                scope: scope.as_deref(),
                limit: *limit,
                ignore_spelling: *ignore_spelling,
            };
            cmd_search(&rt, config, &options)
        }
        Commands::Suggest { query, detailed } => cmd_suggest(&rt, config, query, *detailed),
        Commands::Download { video_id, title } => cmd_download(&rt, config, video_id, title),
    }
}
