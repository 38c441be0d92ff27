//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`, while the CLI
//! uses `anyhow` for convenient error propagation.
//!
//! # Design
//!
//! - [`Error`]: Top-level application error enum
//! - Module-specific errors ([`SearchError`], [`DownloadError`],
//!   [`ConfigError`]) for detailed handling
//! - All errors implement `std::error::Error` for compatibility
//!
//! # Example
//!
//! ```ignore
//! use ytmusic_dl::error::{Result, ResultExt};
//!
//! async fn first_song(engine: &SearchEngine<InnerTubeClient>, q: &SearchQuery) -> Result<()> {
//!     let results = engine.search(q).await.with_context("searching catalog")?;
//!     Ok(())
//! }
//! ```

use crate::config::ConfigError;
use crate::download::DownloadError;
use crate::innertube::SearchError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
///
/// Aggregates errors from all subsystems for unified handling.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Search request or response error
    #[error("{0}")]
    Search(#[from] SearchError),

    /// Audio download error
    #[error("{0}")]
    Download(#[from] DownloadError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::innertube::TransportError;

    #[test]
    fn test_search_error_display_is_transparent() {
        let err: Error = SearchError::InvalidFilter("tracks".to_string()).into();
        assert!(err.to_string().starts_with("Invalid filter provided: tracks"));
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::from(DownloadError::NoOutput).context("while downloading Faded");
        let msg = err.to_string();
        assert!(msg.contains("while downloading Faded"));
        assert!(msg.contains("no file"));
    }

    #[test]
    fn test_result_ext() {
        let result: std::result::Result<(), SearchError> = Err(SearchError::Upstream(
            TransportError::Network("timed out".to_string()),
        ));
        let with_ctx = result.with_context("searching");
        let msg = with_ctx.unwrap_err().to_string();
        assert!(msg.contains("searching"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn test_io_error_converts() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk full"));
        let err = io.with_context("creating download directory").unwrap_err();
        assert!(matches!(err, Error::WithContext { .. }));
    }
}
