//! # completion-relay
//!
//! Hardened client for OpenAI-style completion endpoints: legacy parameter
//! normalization, a closed set of tagged call outcomes, and exact
//! sentinel-string compatibility for callers that still match on bare
//! text.
//!
//! ## Overview
//!
//! The crate wraps a single external completion endpoint behind one catch
//! boundary. Every call produces exactly one [`CallOutcome`]; no error or
//! panic propagates past the wrapper, and logs never carry credentials or
//! unbounded payloads. Requests are built from [`RequestParameters`], the
//! current schema; [`params::normalize`] rewrites the legacy schema
//! (`engine`, `max_tokens`, and the removed penalty/stream/stop fields)
//! into it.
//!
//! ## Key Features
//!
//! - **Outcome classification**: success, rate limit, API error, empty
//!   response and unknown failure as a closed tagged set
//! - **Sentinel compatibility**: [`CallOutcome::into_text`] reproduces the
//!   legacy literals character-for-character
//! - **Retry with backoff**: [`RetryPolicy`] drives
//!   [`CompletionClient::request_with_retry`] (exponential delay, bounded
//!   attempts)
//! - **Validated generation**: [`CompletionClient::safe_generate`] with
//!   caller-supplied validation, clean-up and fail-safe
//! - **Prompt templates**: numbered-placeholder filling via [`prompt`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use completion_relay::{CompletionClient, RequestParameters};
//!
//! #[tokio::main]
//! async fn main() -> completion_relay::Result<()> {
//!     let client = CompletionClient::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let params = RequestParameters::new(client.default_model())
//!         .max_output_tokens(50)
//!         .temperature(0.0);
//!
//!     let outcome = client.request_with_retry("Say hello.", &params).await;
//!     println!("{}", outcome.into_text());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Completion client, builder and retry policy |
//! | [`params`] | Request schema and legacy-parameter normalization |
//! | [`outcome`] | Tagged call outcomes and sentinel strings |
//! | [`config`] | Default-model resolution from the environment |
//! | [`prompt`] | Prompt template filling |
//! | [`transport`] | HTTP transport over the endpoint |

pub mod client;
pub mod config;
pub mod outcome;
pub mod params;
pub mod prompt;
pub mod transport;

// Re-export main types for convenience
pub use client::{CompletionClient, CompletionClientBuilder, RetryPolicy};
pub use outcome::CallOutcome;
pub use params::{normalize, LegacyParameters, RequestParameters};

/// Error type for the library
pub mod error;
pub use error::{Error, Result};
