//! Completion client: request construction, outcome classification and
//! the retry policy around it.
//!
//! Developer-friendly goal: keep the public surface small and predictable.
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod policy;
mod safe;

pub use builder::CompletionClientBuilder;
pub use core::CompletionClient;
pub use policy::RetryPolicy;
