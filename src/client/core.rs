//! Client core: the single catch boundary where every transport result is
//! classified into a [`CallOutcome`].

use crate::client::policy::{Decision, RetryPolicy};
use crate::error::{Error, Result};
use crate::outcome::CallOutcome;
use crate::params::{normalize, LegacyParameters, RequestParameters};
use crate::transport::{HttpTransport, COMPLETIONS_PATH, EMBEDDINGS_PATH};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

/// Logged remote error bodies are cut at this many characters so
/// oversized or sensitive payloads never reach the logs whole.
const LOG_ERROR_MAX_CHARS: usize = 100;

/// Client for one OpenAI-style completion endpoint.
///
/// Stateless aside from the read-only configuration: concurrent calls are
/// independent and need no synchronization. The only await point per call
/// is the network request itself (plus the backoff sleep in the retrying
/// variant, which blocks the calling task).
pub struct CompletionClient {
    pub(crate) transport: HttpTransport,
    pub(crate) default_model: String,
    pub(crate) retry: RetryPolicy,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl CompletionClient {
    pub fn builder() -> crate::client::builder::CompletionClientBuilder {
        crate::client::builder::CompletionClientBuilder::new()
    }

    /// The default model this client was built with.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Normalize a legacy parameter mapping against this client's default
    /// model. See [`crate::params::normalize`].
    pub fn normalize(&self, legacy: &LegacyParameters) -> RequestParameters {
        normalize(legacy, &self.default_model)
    }

    /// Issue one completion call and classify the result.
    ///
    /// Every failure is caught here and converted to a tagged outcome;
    /// nothing propagates past this boundary. Log-safety rules: no
    /// credential material ever, remote error bodies truncated, unknown
    /// failures reported by category only.
    pub async fn request(&self, prompt: &str, params: &RequestParameters) -> CallOutcome {
        // Field presence (including the top_p gating) is encoded once, in
        // the RequestParameters serde attributes.
        let mut body = match serde_json::to_value(params) {
            Ok(body) => body,
            Err(_) => {
                error!(category = "serialize", "completion request failed");
                return CallOutcome::UnknownError;
            }
        };
        body["messages"] = json!([{"role": "user", "content": prompt}]);

        debug!(model = params.model.as_str(), "sending completion request");

        match self.transport.post_json(COMPLETIONS_PATH, &body).await {
            Ok(response) => match first_choice_content(&response) {
                Some(text) => CallOutcome::Success(text),
                None => {
                    warn!(
                        model = params.model.as_str(),
                        "empty response from completion endpoint"
                    );
                    CallOutcome::EmptyResponse
                }
            },
            Err(Error::Remote { status, .. })
                if status == StatusCode::TOO_MANY_REQUESTS.as_u16() =>
            {
                warn!(
                    model = params.model.as_str(),
                    "completion endpoint rate limited"
                );
                CallOutcome::RateLimited
            }
            Err(Error::Remote { status, message }) => {
                error!(
                    http_status = status,
                    error = truncate_chars(&message, LOG_ERROR_MAX_CHARS),
                    "completion endpoint returned an error"
                );
                CallOutcome::ApiError
            }
            Err(Error::Transport(e)) => {
                // Category only; the full message may carry unstructured
                // content we do not control.
                error!(category = e.category(), "completion request failed");
                CallOutcome::UnknownError
            }
            Err(_) => {
                error!(category = "internal", "completion request failed");
                CallOutcome::UnknownError
            }
        }
    }

    /// Like [`request`](Self::request), retrying transient outcomes per
    /// the configured [`RetryPolicy`].
    ///
    /// A `Success` short-circuits immediately. On exhausting the attempt
    /// bound the last non-success outcome is returned.
    pub async fn request_with_retry(
        &self,
        prompt: &str,
        params: &RequestParameters,
    ) -> CallOutcome {
        let mut attempt: u32 = 0;
        loop {
            let outcome = self.request(prompt, params).await;
            if outcome.is_success() {
                return outcome;
            }

            match self.retry.decide(&outcome, attempt) {
                Decision::Retry { delay } => {
                    warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retrying completion request"
                    );
                    if delay.as_millis() > 0 {
                        tokio::time::sleep(delay).await;
                    }
                    attempt = attempt.saturating_add(1);
                }
                Decision::Fail => return outcome,
            }
        }
    }

    /// Single-attempt call returning the legacy string representation
    /// (success text or one of the exact sentinel literals).
    pub async fn request_text(&self, prompt: &str, params: &RequestParameters) -> String {
        self.request(prompt, params).await.into_text()
    }

    /// Fetch an embedding vector for `text`.
    ///
    /// Not part of the wrapper outcome boundary; errors surface directly.
    /// Blank input is substituted so the endpoint never sees an empty
    /// string, and newlines are flattened to spaces.
    pub async fn embedding(&self, text: &str, model: &str) -> Result<Vec<f32>> {
        let cleaned = text.replace('\n', " ");
        let input = if cleaned.trim().is_empty() {
            "this is blank".to_string()
        } else {
            cleaned
        };

        let body = json!({ "input": [input], "model": model });
        let response = self.transport.post_json(EMBEDDINGS_PATH, &body).await?;

        let parsed: EmbeddingResponse = serde_json::from_value(response)
            .map_err(|e| Error::MalformedResponse(format!("embedding response: {e}")))?;
        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::MalformedResponse("embedding response has no data".to_string()))
    }
}

/// Extract the textual content of the first candidate, if any.
///
/// A null body, a shape mismatch or an empty candidate list all count as
/// "no content" and map to `EmptyResponse` at the caller.
fn first_choice_content(response: &serde_json::Value) -> Option<String> {
    let parsed: CompletionResponse = serde_json::from_value(response.clone()).ok()?;
    parsed.choices.into_iter().next().map(|c| c.message.content)
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_choice_content_reads_first_candidate() {
        let response = json!({
            "choices": [
                {"message": {"content": "first"}},
                {"message": {"content": "second"}}
            ]
        });
        assert_eq!(first_choice_content(&response), Some("first".to_string()));
    }

    #[test]
    fn degenerate_responses_have_no_content() {
        for response in [
            json!({"choices": []}),
            json!({}),
            json!(null),
            json!({"choices": [{"message": {}}]}),
        ] {
            assert_eq!(first_choice_content(&response), None, "{response}");
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("hello", 100), "hello");
        assert_eq!(truncate_chars("hello", 3), "hel");
        // Multi-byte chars count as one.
        assert_eq!(truncate_chars("日本語テスト", 3), "日本語");
    }
}
