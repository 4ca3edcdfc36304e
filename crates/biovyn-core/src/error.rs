//! Error types for the BiovynAI resolver core.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for a single provider invocation.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Failure of one provider attempt.
///
/// Every adapter normalizes its transport, status, and body-shape failures
/// into one of these variants; nothing provider-specific crosses the adapter
/// boundary. The resolver converts each of them into "try the next provider",
/// so they never reach the caller of `resolve_text`/`resolve_diagram`.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The invocation exceeded its configured deadline.
    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    /// The service could not be reached (connection refused, DNS, TLS).
    #[error("Unreachable: {0}")]
    Unreachable(String),

    /// Non-success status or a response body missing the expected fields.
    #[error("Bad response: {0}")]
    BadResponse(String),

    /// Credentials absent or rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The provider has no answer for this request (e.g. no table entry).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The provider reported success but returned nothing usable.
    #[error("Empty result: {0}")]
    EmptyResult(String),
}

impl ProviderError {
    /// Short kind tag for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout(_) => "timeout",
            Self::Unreachable(_) => "unreachable",
            Self::BadResponse(_) => "bad_response",
            Self::Unauthorized(_) => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::EmptyResult(_) => "empty_result",
        }
    }
}

/// Core error type for resolver operations.
///
/// `Config` is the only variant a correctly wired caller can observe: it is
/// raised at setup time (a chain with no providers, invalid settings) and
/// never during resolution.
#[derive(Error, Debug)]
pub enum Error {
    /// A provider invocation failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Configuration error, surfaced at startup.
    #[error("Configuration error: {0}")]
    Config(String),
}
