//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\ytmusic-dl\config.toml
//! - macOS: ~/Library/Application Support/ytmusic-dl/config.toml
//! - Linux: ~/.config/ytmusic-dl/config.toml
//!
//! Every setting is optional. Command-line flags override what is here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::innertube::{ResultTypeLabels, SearchError, SearchFilter};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// InnerTube client settings
    pub client: ClientConfig,

    /// Search defaults
    pub search: SearchConfig,

    /// Download settings
    pub download: DownloadConfig,
}

/// InnerTube client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, endpoints are appended to it
    pub base_url: String,

    /// Interface language (`hl`)
    pub language: String,

    /// Content region (`gl`), server default when unset
    pub location: Option<String>,

    pub user_agent: String,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://music.youtube.com/youtubei/v1/".to_string(),
            language: "en".to_string(),
            location: None,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:88.0) Gecko/20100101 Firefox/88.0"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

/// Search defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Filter used when none is given (empty = blended search)
    pub default_filter: String,

    pub default_limit: usize,

    /// Result-type labels in the client language, in the order
    /// artist, playlist, song, video, station, profile, podcast, episode
    pub result_type_labels: ResultTypeLabels,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_filter: "songs".to_string(),
            default_limit: 10,
            result_type_labels: ResultTypeLabels::default(),
        }
    }
}

impl SearchConfig {
    /// The configured default filter
    pub fn filter(&self) -> Result<Option<SearchFilter>, SearchError> {
        match self.default_filter.trim() {
            "" => Ok(None),
            name => name.parse().map(Some),
        }
    }
}

/// Download settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Where audio files are written
    pub directory: PathBuf,

    /// yt-dlp format selector
    pub format: String,

    /// yt-dlp executable (name in PATH or full path)
    pub ytdlp_path: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("downloads"),
            format: "bestaudio".to_string(),
            ytdlp_path: "yt-dlp".to_string(),
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ytmusic-dl"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match load_from(&path) {
        Ok(config) => {
            tracing::debug!("Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            tracing::warn!("{}; using default configuration", e);
            Config::default()
        }
    }
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

// ============================================================================
// Tests
// ============================================================================
