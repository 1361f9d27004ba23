//! Default-model configuration.
//!
//! The default model is resolved from the environment once at client build
//! time and injected into the normalizer and wrapper, so both stay
//! testable without environment manipulation.

use std::env;

/// Fixed fallback when no environment override is present.
pub const DEFAULT_MODEL: &str = "gpt-5-nano";

/// Environment variable that overrides [`DEFAULT_MODEL`] when set to a
/// non-empty string.
pub const MODEL_ENV_VAR: &str = "OPENAI_MODEL";

/// Resolve the default model identifier from the process environment.
///
/// Pure over the environment at call time; re-reading is idempotent for a
/// fixed environment.
pub fn resolve_default_model() -> String {
    env::var(MODEL_ENV_VAR)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}
