//! Audio download by shelling out to `yt-dlp`
//!
//! `yt-dlp` does the actual fetching and container handling; we only build
//! its command line and read back the final file path it prints.
//!
//! Install yt-dlp:
//! - Windows: `winget install yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `pipx install yt-dlp` or your distribution's package

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::DownloadConfig;

const WATCH_URL: &str = "https://music.youtube.com/watch?v=";

/// Errors that can occur while downloading
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} not found. Please install yt-dlp: https://github.com/yt-dlp/yt-dlp")]
    ToolNotFound(String),

    #[error("Download failed: {0}")]
    Failed(String),

    #[error("Download finished but produced no file")]
    NoOutput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fetches the audio stream of a video to local storage.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `video_id` and return the path of the audio file.
    ///
    /// `title_hint` is only used for logging and to locate the file when the
    /// tool does not report it.
    async fn fetch_audio(&self, video_id: &str, title_hint: &str)
    -> Result<PathBuf, DownloadError>;
}

/// [`Downloader`] backed by the `yt-dlp` executable
pub struct YtDlpDownloader {
    ytdlp_path: String,
    directory: PathBuf,
    format: String,
}

impl YtDlpDownloader {
    pub fn new(config: &DownloadConfig) -> Self {
        Self {
            ytdlp_path: config.ytdlp_path.clone(),
            directory: config.directory.clone(),
            format: config.format.clone(),
        }
    }

    /// Arguments passed to yt-dlp for one video
    fn command_args(&self, video_id: &str) -> Vec<String> {
        let template = self.directory.join("%(title)s.%(ext)s");
        vec![
            "-f".to_string(),
            self.format.clone(),
            "-o".to_string(),
            template.to_string_lossy().into_owned(),
            "--no-playlist".to_string(),
            "--print".to_string(),
            "after_move:filepath".to_string(),
            format!("{WATCH_URL}{}", urlencoding::encode(video_id)),
        ]
    }

    /// Check if yt-dlp can be executed
    pub async fn is_available(&self) -> bool {
        Command::new(&self.ytdlp_path)
            .arg("--version")
            .output()
            .await
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

#[async_trait]
impl Downloader for YtDlpDownloader {
    async fn fetch_audio(
        &self,
        video_id: &str,
        title_hint: &str,
    ) -> Result<PathBuf, DownloadError> {
        validate_video_id(video_id)?;
        tokio::fs::create_dir_all(&self.directory).await?;

        tracing::info!(video_id, title = title_hint, "Downloading audio");

        let output = Command::new(&self.ytdlp_path)
            .args(self.command_args(video_id))
            .output()
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => DownloadError::ToolNotFound(self.ytdlp_path.clone()),
                _ => DownloadError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DownloadError::Failed(stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let path = printed_path(&stdout)
            .or_else(|| find_by_title(&self.directory, title_hint))
            .ok_or(DownloadError::NoOutput)?;

        tracing::info!(path = %path.display(), "Downloaded audio file");
        Ok(relative_to_cwd(path))
    }
}

/// Video ids are short URL-safe tokens
fn validate_video_id(video_id: &str) -> Result<(), DownloadError> {
    if video_id.is_empty() {
        return Err(DownloadError::InvalidInput(
            "video id cannot be empty".to_string(),
        ));
    }

    if !video_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(DownloadError::InvalidInput(format!(
            "invalid video id: {video_id}"
        )));
    }

    Ok(())
}

/// Last non-empty line of yt-dlp's output
fn printed_path(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// A file in `dir` named after the title, whatever its extension
fn find_by_title(dir: &Path, title: &str) -> Option<PathBuf> {
    if title.is_empty() {
        return None;
    }

    std::fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .find(|path| path.is_file() && path.file_stem().is_some_and(|stem| stem == title))
}

fn relative_to_cwd(path: PathBuf) -> PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or(path)
}
