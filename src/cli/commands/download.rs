//! Audio download command.

use serde_json::Value;
use tokio::runtime::Runtime;

use crate::cli::output;
use crate::config::Config;
use crate::download::{DownloadError, Downloader, YtDlpDownloader};

/// Download one song and return the file envelope
pub fn cmd_download(
    rt: &Runtime,
    config: &Config,
    video_id: &str,
    title: &[String],
) -> anyhow::Result<Value> {
    let downloader = YtDlpDownloader::new(&config.download);

    // Check if yt-dlp is available
    if !rt.block_on(downloader.is_available()) {
        return Err(DownloadError::ToolNotFound(config.download.ytdlp_path.clone()).into());
    }

    let path = rt.block_on(downloader.fetch_audio(video_id, &title.join(" ")))?;

    Ok(output::success_file(&path))
}
