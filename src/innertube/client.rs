//! InnerTube HTTP client
//!
//! Posts JSON request bodies to the YouTube Music web API.
//!
//! Every body is sent together with a `context` object identifying the web
//! client (`WEB_REMIX`), whose version is derived from today's UTC date.

use std::time::Duration;

use chrono::Utc;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, ORIGIN};
use serde_json::{Map, Value, json};

use super::domain::TransportError;
use crate::config::ClientConfig;

const CLIENT_NAME: &str = "WEB_REMIX";
const YTM_ORIGIN: &str = "https://music.youtube.com";

/// YouTube Music InnerTube client
pub struct InnerTubeClient {
    http_client: reqwest::Client,
    base_url: String,
    language: String,
    location: Option<String>,
}

impl InnerTubeClient {
    /// Create a client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, HeaderValue::from_static(YTM_ORIGIN));
        headers.insert("x-origin", HeaderValue::from_static(YTM_ORIGIN));

        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            language: config.language.clone(),
            location: config.location.clone(),
        })
    }

    /// POST `body` (merged with the client context) to `endpoint`
    pub async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        additional_params: &str,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint_url(endpoint, additional_params);
        tracing::debug!(endpoint, "Sending InnerTube request");

        let response = self
            .http_client
            .post(&url)
            .json(&self.request_body(body))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))
    }

    fn endpoint_url(&self, endpoint: &str, additional_params: &str) -> String {
        format!("{}{}?alt=json{}", self.base_url, endpoint, additional_params)
    }

    /// `body` with the client `context` added
    fn request_body(&self, body: &Value) -> Value {
        let mut client = Map::new();
        client.insert("clientName".to_string(), json!(CLIENT_NAME));
        client.insert("clientVersion".to_string(), json!(client_version()));
        client.insert("hl".to_string(), json!(self.language));
        if let Some(location) = &self.location {
            client.insert("gl".to_string(), json!(location));
        }

        let mut merged = body.as_object().cloned().unwrap_or_default();
        merged.insert(
            "context".to_string(),
            json!({ "client": client, "user": {} }),
        );
        Value::Object(merged)
    }
}

/// Web client version for today, e.g. `1.20240101.01.00`
fn client_version() -> String {
    format!("1.{}.01.00", Utc::now().format("%Y%m%d"))
}
