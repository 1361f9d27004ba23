use crate::client::core::CompletionClient;
use crate::client::policy::RetryPolicy;
use crate::config;
use crate::error::Result;
use crate::transport::HttpTransport;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable (developer-friendly).
pub struct CompletionClientBuilder {
    api_key: Option<String>,
    default_model: Option<String>,
    /// Override base URL (primarily for testing with mock servers)
    base_url_override: Option<String>,
    timeout: Option<Duration>,
    retry: RetryPolicy,
}

impl CompletionClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            default_model: None,
            base_url_override: None,
            timeout: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the bearer API key. Never logged by the client.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the default model identifier. When unset, it is resolved from
    /// the `OPENAI_MODEL` env var, falling back to the fixed literal.
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Override the completion endpoint base URL.
    ///
    /// This is primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Set the request timeout on the underlying HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry policy used by `request_with_retry` and
    /// `safe_generate`.
    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CompletionClient> {
        let default_model = self
            .default_model
            .unwrap_or_else(config::resolve_default_model);

        let transport = HttpTransport::new(
            self.base_url_override.as_deref(),
            self.api_key,
            self.timeout,
        )?;

        Ok(CompletionClient {
            transport,
            default_model,
            retry: self.retry,
        })
    }
}

impl Default for CompletionClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
