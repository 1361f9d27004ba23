//! Validated generation with a caller-supplied fail-safe.
//!
//! Two flavors: plain text, and a structured variant that asks the model
//! for a `{"output": ...}` JSON envelope and unwraps it before
//! validation.

use crate::client::core::CompletionClient;
use crate::outcome::CallOutcome;
use crate::params::RequestParameters;
use tracing::{debug, warn};

impl CompletionClient {
    /// Generate a response, accepting it only when `validate` passes.
    ///
    /// Each attempt issues a single call; failed calls and rejected
    /// responses both consume an attempt (the attempt bound comes from the
    /// configured retry policy), with the policy's backoff between
    /// attempts. An accepted response is passed through `clean_up`;
    /// exhausting all attempts yields the caller's `fail_safe` string.
    pub async fn safe_generate<V, C>(
        &self,
        prompt: &str,
        params: &RequestParameters,
        fail_safe: &str,
        validate: V,
        clean_up: C,
    ) -> String
    where
        V: Fn(&str) -> bool,
        C: Fn(&str) -> String,
    {
        let attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.request(prompt, params).await {
                CallOutcome::Success(text) => {
                    if validate(&text) {
                        return clean_up(&text);
                    }
                    debug!(attempt, "response rejected by validator");
                }
                outcome => {
                    warn!(attempt, outcome = ?outcome, "generation attempt failed");
                }
            }
            self.pace_attempts(attempt, attempts).await;
        }

        warn!(attempts, "all generation attempts failed, using fail-safe response");
        fail_safe.to_string()
    }

    /// Like [`safe_generate`](Self::safe_generate), but instructs the
    /// model to answer inside a `{"output": ...}` JSON envelope and
    /// unwraps it before validation.
    ///
    /// The prompt is quoted and decorated with `special_instruction` and
    /// an example envelope built from `example_output`. A response whose
    /// envelope cannot be extracted (no closing brace, unparsable JSON,
    /// missing `output` key) consumes an attempt like any other failure.
    pub async fn safe_generate_structured<V, C>(
        &self,
        prompt: &str,
        example_output: &str,
        special_instruction: &str,
        params: &RequestParameters,
        fail_safe: &str,
        validate: V,
        clean_up: C,
    ) -> String
    where
        V: Fn(&str) -> bool,
        C: Fn(&str) -> String,
    {
        let decorated = decorate_structured_prompt(prompt, example_output, special_instruction);

        let attempts = self.retry.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.request(&decorated, params).await {
                CallOutcome::Success(text) => match extract_output_envelope(&text) {
                    Some(output) => {
                        if validate(&output) {
                            return clean_up(&output);
                        }
                        debug!(attempt, "response rejected by validator");
                    }
                    None => {
                        warn!(attempt, "response is not a usable json envelope");
                    }
                },
                outcome => {
                    warn!(attempt, outcome = ?outcome, "generation attempt failed");
                }
            }
            self.pace_attempts(attempt, attempts).await;
        }

        warn!(attempts, "all generation attempts failed, using fail-safe response");
        fail_safe.to_string()
    }

    /// Backoff between failed attempts. No sleep after the last one.
    async fn pace_attempts(&self, attempt: u32, attempts: u32) {
        if attempt < attempts {
            let delay = self.retry.backoff_delay(attempt - 1);
            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn decorate_structured_prompt(
    prompt: &str,
    example_output: &str,
    special_instruction: &str,
) -> String {
    format!(
        "\"\"\"\n{prompt}\n\"\"\"\n\
         Output the response to the prompt above in json. {special_instruction}\n\
         Example output json:\n\
         {{\"output\": \"{example_output}\"}}"
    )
}

/// Pull the `output` value out of a `{"output": ...}` envelope.
///
/// Models tend to append trailing prose after the closing brace, so the
/// candidate is cut at the last `}`. A non-string `output` value is
/// rendered back to compact JSON.
fn extract_output_envelope(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.rfind('}')? + 1;
    let parsed: serde_json::Value = serde_json::from_str(&trimmed[..end]).ok()?;
    match parsed.get("output")? {
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_extraction_reads_output_value() {
        assert_eq!(
            extract_output_envelope(r#"{"output": "test value"}"#),
            Some("test value".to_string())
        );
    }

    #[test]
    fn envelope_extraction_cuts_at_last_brace() {
        assert_eq!(
            extract_output_envelope("{\"output\": \"v\"}\nHope this helps!"),
            Some("v".to_string())
        );
    }

    #[test]
    fn envelope_extraction_rejects_degenerate_responses() {
        for text in [
            "",
            "   ",
            r#"{"output": "incomplete"#,
            r#"{"result": "wrong key"}"#,
            "no json at all",
        ] {
            assert_eq!(extract_output_envelope(text), None, "{text:?}");
        }
    }

    #[test]
    fn envelope_extraction_renders_non_string_output() {
        assert_eq!(
            extract_output_envelope(r#"{"output": 42}"#),
            Some("42".to_string())
        );
    }

    #[test]
    fn decorated_prompt_quotes_and_instructs() {
        let decorated = decorate_structured_prompt("classify this", "rest", "One word only.");
        assert!(decorated.starts_with("\"\"\"\nclassify this\n\"\"\"\n"));
        assert!(decorated.contains("Output the response to the prompt above in json. One word only."));
        assert!(decorated.ends_with("Example output json:\n{\"output\": \"rest\"}"));
    }
}
