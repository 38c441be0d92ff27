//! Trait definitions for the InnerTube transport.
//!
//! The engine never builds its own HTTP client. Production code hands it an
//! [`InnerTubeClient`](super::client::InnerTubeClient); tests substitute the
//! scripted mock below.
//!
//! # Example
//!
//! ```ignore
//! use ytmusic_dl::innertube::{SearchEngine, InnerTubeClient};
//!
//! let engine = SearchEngine::new(InnerTubeClient::new(&config.client)?);
//! let results = engine.search(&query).await?;
//! ```

use async_trait::async_trait;
use serde_json::Value;

use super::domain::TransportError;

/// Sends one InnerTube request and returns the decoded response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `endpoint`.
    ///
    /// `additional_params` is appended verbatim to the query string
    /// (continuation tokens use `&ctoken=...&continuation=...`).
    async fn send(
        &self,
        endpoint: &str,
        body: &Value,
        additional_params: &str,
    ) -> Result<Value, TransportError>;
}

#[async_trait]
impl Transport for super::client::InnerTubeClient {
    async fn send(
        &self,
        endpoint: &str,
        body: &Value,
        additional_params: &str,
    ) -> Result<Value, TransportError> {
        self.post(endpoint, body, additional_params).await
    }
}
