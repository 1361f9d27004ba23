//! Tagged call outcomes and the legacy sentinel string mapping.
//!
//! New callers should match on [`CallOutcome`] directly. The sentinel
//! strings exist for backward compatibility with callers that expect bare
//! text and match on these exact literals; the mapping is performed only
//! at that boundary, via [`CallOutcome::into_text`].

/// Sentinel returned when the endpoint answers 2xx without any candidate.
pub const EMPTY_RESPONSE_SENTINEL: &str = "ERROR: Empty response";
/// Sentinel returned when the endpoint signals a rate limit.
pub const RATE_LIMITED_SENTINEL: &str = "TOKEN LIMIT EXCEEDED";
/// Sentinel returned on a generic service-side failure.
pub const API_ERROR_SENTINEL: &str = "API ERROR";
/// Sentinel returned on any unclassified failure.
pub const UNKNOWN_ERROR_SENTINEL: &str = "ERROR";

/// Outcome of a single completion call.
///
/// Exactly one variant is produced per invocation; never two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The first candidate's textual content.
    Success(String),
    /// The endpoint rejected the call with a rate-limit signal. Transient.
    RateLimited,
    /// Generic service-side failure. Retryable with a bound.
    ApiError,
    /// A well-formed 2xx response carrying no candidates. Malformed rather
    /// than transient, so not retried unless explicitly configured.
    EmptyResponse,
    /// Unclassified failure (transport, decode). Never retried, so
    /// programming errors are not masked by the retry loop.
    UnknownError,
}

impl CallOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }

    /// Convert into the legacy string representation.
    ///
    /// The sentinel literals are a wire contract: downstream code matches
    /// on them character-for-character.
    pub fn into_text(self) -> String {
        match self {
            CallOutcome::Success(text) => text,
            CallOutcome::EmptyResponse => EMPTY_RESPONSE_SENTINEL.to_string(),
            CallOutcome::RateLimited => RATE_LIMITED_SENTINEL.to_string(),
            CallOutcome::ApiError => API_ERROR_SENTINEL.to_string(),
            CallOutcome::UnknownError => UNKNOWN_ERROR_SENTINEL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_mapping_is_exact() {
        assert_eq!(
            CallOutcome::Success("hello".to_string()).into_text(),
            "hello"
        );
        assert_eq!(
            CallOutcome::EmptyResponse.into_text(),
            "ERROR: Empty response"
        );
        assert_eq!(CallOutcome::RateLimited.into_text(), "TOKEN LIMIT EXCEEDED");
        assert_eq!(CallOutcome::ApiError.into_text(), "API ERROR");
        assert_eq!(CallOutcome::UnknownError.into_text(), "ERROR");
    }
}
