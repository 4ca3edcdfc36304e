//! Provider traits for the fallback chain.
//!
//! These traits define the uniform call contract every backend adapter must
//! satisfy, enabling pluggable providers and testability. Adapters are pure
//! with respect to the chain: they never touch shared session state.

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::models::Payload;

/// One fallback candidate: a uniform wrapper around exactly one external
/// capability (local model, cloud API, static table).
///
/// Any transport error, non-success status, malformed body, or
/// provider-declared refusal must surface as a `ProviderError`; adapters do
/// not leak provider-specific error shapes. Network-facing implementations
/// also apply their own bounded request timeout; the chain enforces a second,
/// outer bound.
#[async_trait]
pub trait FallbackProvider: Send + Sync {
    /// Payload type this provider produces.
    type Output: Payload + Send;

    /// Stable identifier, reported as the `source` of a resolution.
    fn id(&self) -> &'static str;

    /// Resolve one request. Text providers take a composed prompt; diagram
    /// providers take a topic string.
    async fn invoke(&self, request: &str) -> ProviderResult<Self::Output>;
}

/// The guaranteed base case of a chain. Infallible by type: no transport, no
/// credentials, no I/O. Only synthesis from the request itself.
pub trait TerminalProvider: Send + Sync {
    type Output: Payload;

    fn id(&self) -> &'static str;

    /// Produce a payload. Must be usable for every input.
    fn invoke(&self, request: &str) -> Self::Output;
}
