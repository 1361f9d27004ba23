use crate::outcome::CallOutcome;
use std::time::Duration;

/// Internal decision for how to proceed after an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Retry policy for [`CompletionClient::request_with_retry`].
///
/// Retries rate-limit and generic API failures with exponential backoff
/// (`min_delay * 2^attempt`, capped at `max_delay`). An empty response is
/// malformed rather than transient and participates only when
/// `retry_empty` is enabled; unclassified failures are never retried.
///
/// [`CompletionClient::request_with_retry`]: crate::CompletionClient::request_with_retry
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total tries, first call included. 3 means at most 3 endpoint calls.
    pub max_attempts: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub retry_empty: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            retry_empty: false,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Also retry [`CallOutcome::EmptyResponse`].
    pub fn with_retry_empty(mut self, enable: bool) -> Self {
        self.retry_empty = enable;
        self
    }

    /// `attempt` is 0-based (first failure => attempt=0).
    pub(crate) fn decide(&self, outcome: &CallOutcome, attempt: u32) -> Decision {
        let retryable = match outcome {
            CallOutcome::RateLimited | CallOutcome::ApiError => true,
            CallOutcome::EmptyResponse => self.retry_empty,
            CallOutcome::Success(_) | CallOutcome::UnknownError => false,
        };

        if retryable && attempt + 1 < self.max_attempts {
            Decision::Retry {
                delay: self.backoff_delay(attempt),
            }
        } else {
            Decision::Fail
        }
    }

    pub(crate) fn backoff_delay(&self, attempt: u32) -> Duration {
        let base_ms = self.min_delay.as_millis() as u64;
        if base_ms == 0 {
            return Duration::ZERO;
        }
        // exponential backoff: min_delay * 2^attempt
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay_ms = base_ms
            .saturating_mul(factor)
            .min(self.max_delay.as_millis() as u64);
        Duration::from_millis(delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(10)
            .with_min_delay(Duration::from_millis(100))
            .with_max_delay(Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(400));
        assert_eq!(policy.backoff_delay(3), Duration::from_millis(500));
        assert_eq!(policy.backoff_delay(63), Duration::from_millis(500));
    }

    #[test]
    fn zero_min_delay_never_sleeps() {
        let policy = RetryPolicy::new(3).with_min_delay(Duration::ZERO);
        assert_eq!(policy.backoff_delay(5), Duration::ZERO);
    }

    #[test]
    fn retryable_outcomes_respect_attempt_bound() {
        let policy = RetryPolicy::new(3).with_min_delay(Duration::ZERO);
        for outcome in [CallOutcome::RateLimited, CallOutcome::ApiError] {
            assert!(matches!(
                policy.decide(&outcome, 0),
                Decision::Retry { .. }
            ));
            assert!(matches!(
                policy.decide(&outcome, 1),
                Decision::Retry { .. }
            ));
            // Third attempt is the last one.
            assert_eq!(policy.decide(&outcome, 2), Decision::Fail);
        }
    }

    #[test]
    fn empty_response_retried_only_when_enabled() {
        let default = RetryPolicy::new(3);
        assert_eq!(default.decide(&CallOutcome::EmptyResponse, 0), Decision::Fail);

        let opted_in = RetryPolicy::new(3).with_retry_empty(true);
        assert!(matches!(
            opted_in.decide(&CallOutcome::EmptyResponse, 0),
            Decision::Retry { .. }
        ));
    }

    #[test]
    fn unknown_error_is_never_retried() {
        let policy = RetryPolicy::new(5);
        assert_eq!(policy.decide(&CallOutcome::UnknownError, 0), Decision::Fail);
    }
}
