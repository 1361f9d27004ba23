//! Request parameter schema and legacy-parameter normalization.
//!
//! The current schema carries `model`, `max_output_tokens`, `temperature`
//! and an optional `top_p`. The legacy schema named the model `engine`,
//! the token bound `max_tokens`, and carried four fields with no successor
//! (`frequency_penalty`, `presence_penalty`, `stream`, `stop`).
//! [`normalize`] rewrites the former into the latter; the legacy names are
//! unrepresentable in [`RequestParameters`], so a constructed value can
//! never leak them into a serialized request.

use serde::{Deserialize, Serialize};

/// Model identifiers containing this substring belong to a deprecated
/// family and are rewritten to the configured default. Case-sensitive.
pub const DEPRECATED_FAMILY_MARKER: &str = "davinci";

fn omit_top_p(top_p: &Option<f64>) -> bool {
    match top_p {
        None => true,
        // The schema default; including it would be redundant and some
        // models reject the combination with temperature.
        Some(v) => *v == 1.0,
    }
}

/// Parameters for one completion request, in the current schema.
///
/// Serializes to exactly `{model, max_output_tokens?, temperature?,
/// top_p?}`; absent optional fields are omitted, and `top_p` appears if
/// and only if its value differs from the schema default of 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestParameters {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "omit_top_p")]
    pub top_p: Option<f64>,
}

impl RequestParameters {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            max_output_tokens: None,
            temperature: None,
            top_p: None,
        }
    }

    /// Set the output token bound.
    pub fn max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Set the sampling temperature.
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set the nucleus-sampling threshold. A value of 1 is the schema
    /// default and is omitted from the serialized request.
    pub fn top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }
}

/// The predecessor parameter mapping. Constructed by a caller, consumed
/// once by [`normalize`], discarded.
///
/// All fields are optional so any caller-side mapping deserializes
/// without error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyParameters {
    pub engine: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
    pub stream: Option<bool>,
    pub stop: Option<serde_json::Value>,
}

/// Rewrite a legacy parameter mapping into the current schema.
///
/// - A legacy `engine` is dropped and the model collapses to
///   `default_model` (engine values are not individually mapped).
/// - A `model` from a deprecated family (substring match on
///   [`DEPRECATED_FAMILY_MARKER`]) is replaced with `default_model`.
/// - `max_tokens` is renamed to `max_output_tokens`; an already-current
///   `max_output_tokens` passes through.
/// - `temperature` is copied unchanged; `top_p` is kept only when present
///   and different from 1.
/// - `frequency_penalty`, `presence_penalty`, `stream` and `stop` are
///   dropped unconditionally.
///
/// Total over any input; there is no error path.
pub fn normalize(params: &LegacyParameters, default_model: &str) -> RequestParameters {
    let model = if params.engine.is_some() {
        default_model.to_string()
    } else {
        match &params.model {
            Some(m) if !m.contains(DEPRECATED_FAMILY_MARKER) => m.clone(),
            _ => default_model.to_string(),
        }
    };

    RequestParameters {
        model,
        max_output_tokens: params.max_tokens.or(params.max_output_tokens),
        temperature: params.temperature,
        top_p: params.top_p.filter(|v| *v != 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT: &str = "gpt-5-nano";

    fn legacy_full() -> LegacyParameters {
        LegacyParameters {
            engine: Some("text-davinci-003".to_string()),
            model: None,
            max_tokens: Some(50),
            max_output_tokens: None,
            temperature: Some(0.0),
            top_p: Some(1.0),
            frequency_penalty: Some(0.0),
            presence_penalty: Some(0.0),
            stream: Some(false),
            stop: Some(serde_json::Value::Null),
        }
    }

    #[test]
    fn legacy_engine_collapses_to_default_and_drops_dead_fields() {
        let out = normalize(&legacy_full(), DEFAULT);
        let serialized = serde_json::to_value(&out).unwrap();
        assert_eq!(
            serialized,
            json!({
                "model": "gpt-5-nano",
                "max_output_tokens": 50,
                "temperature": 0.0
            })
        );
    }

    #[test]
    fn non_default_top_p_is_preserved() {
        let mut legacy = legacy_full();
        legacy.max_tokens = Some(100);
        legacy.temperature = Some(0.7);
        legacy.top_p = Some(0.9);
        let out = normalize(&legacy, DEFAULT);
        let serialized = serde_json::to_value(&out).unwrap();
        assert_eq!(
            serialized,
            json!({
                "model": "gpt-5-nano",
                "max_output_tokens": 100,
                "temperature": 0.7,
                "top_p": 0.9
            })
        );
    }

    #[test]
    fn legacy_keys_never_survive_serialization() {
        let out = normalize(&legacy_full(), DEFAULT);
        let serialized = serde_json::to_value(&out).unwrap();
        let obj = serialized.as_object().unwrap();
        for key in ["engine", "frequency_penalty", "presence_penalty", "stream", "stop", "max_tokens"] {
            assert!(!obj.contains_key(key), "unexpected key {key}");
        }
    }

    #[test]
    fn deprecated_family_model_is_rewritten() {
        for model in ["text-davinci-003", "davinci", "code-davinci-edit-001"] {
            let legacy = LegacyParameters {
                model: Some(model.to_string()),
                max_output_tokens: Some(10),
                ..Default::default()
            };
            let out = normalize(&legacy, DEFAULT);
            assert_eq!(out.model, DEFAULT, "model {model} should be rewritten");
        }
    }

    #[test]
    fn current_model_passes_through() {
        let legacy = LegacyParameters {
            model: Some("gpt-4".to_string()),
            max_output_tokens: Some(10),
            ..Default::default()
        };
        let out = normalize(&legacy, DEFAULT);
        assert_eq!(out.model, "gpt-4");
    }

    #[test]
    fn missing_optional_fields_stay_absent() {
        let legacy = LegacyParameters {
            model: Some("gpt-4".to_string()),
            max_output_tokens: Some(10),
            ..Default::default()
        };
        let out = normalize(&legacy, DEFAULT);
        let serialized = serde_json::to_value(&out).unwrap();
        assert_eq!(
            serialized,
            json!({ "model": "gpt-4", "max_output_tokens": 10 })
        );
    }

    #[test]
    fn builder_top_p_of_one_is_omitted_from_request() {
        let params = RequestParameters::new("gpt-4")
            .max_output_tokens(50)
            .temperature(0.0)
            .top_p(1.0);
        let serialized = serde_json::to_value(&params).unwrap();
        assert!(serialized.as_object().unwrap().get("top_p").is_none());
    }
}
