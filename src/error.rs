use crate::transport::TransportError;
use thiserror::Error;

/// Errors produced below the wrapper boundary.
///
/// None of these escape [`CompletionClient::request`]: every variant is
/// classified into a [`CallOutcome`] at that single catch point. Only the
/// non-wrapper operations (client construction, embeddings) surface them
/// to callers.
///
/// [`CompletionClient::request`]: crate::CompletionClient::request
/// [`CallOutcome`]: crate::CallOutcome
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint answered with a non-success HTTP status.
    ///
    /// The body is carried verbatim for classification; log sites must
    /// truncate it before emitting.
    #[error("remote error: HTTP {status}")]
    Remote { status: u16, message: String },

    /// The request never produced a usable HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A 2xx response whose body does not match the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Client-side setup failure (HTTP client construction).
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
