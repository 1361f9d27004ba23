//! HTTP transport for the completion endpoint.

use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub(crate) const COMPLETIONS_PATH: &str = "/chat/completions";
pub(crate) const EMBEDDINGS_PATH: &str = "/embeddings";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Build a transport. `base_url` override is primarily for testing
    /// with mock servers; `timeout` falls back to the
    /// `RELAY_HTTP_TIMEOUT_SECS` env var, then to 30 seconds.
    pub(crate) fn new(
        base_url: Option<&str>,
        api_key: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let timeout = timeout.unwrap_or_else(|| {
            let secs = env::var("RELAY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS);
            Duration::from_secs(secs)
        });

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
        })
    }

    /// POST a JSON body and return the parsed JSON response.
    ///
    /// Non-success statuses become [`Error::Remote`] with the body carried
    /// for classification; everything below HTTP becomes
    /// [`Error::Transport`].
    pub(crate) async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.post(&url).json(body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(TransportError::Http)?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let json = resp.json().await.map_err(TransportError::Http)?;
        Ok(json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Coarse category for log-safe reporting. Unclassified failures must
    /// never leak their full message into logs, only this kind.
    pub fn category(&self) -> &'static str {
        match self {
            TransportError::Http(e) if e.is_timeout() => "timeout",
            TransportError::Http(e) if e.is_connect() => "connect",
            TransportError::Http(e) if e.is_decode() => "decode",
            TransportError::Http(_) => "request",
            TransportError::Other(_) => "other",
        }
    }
}
