//! OpenAI-specific error normalization.
//!
//! Maps HTTP status codes and error bodies onto the uniform provider error
//! taxonomy so nothing OpenAI-shaped crosses the adapter boundary.

use biovyn_core::ProviderError;

/// Convert a non-success response into a [`ProviderError`].
pub(super) fn error_from_status(status: reqwest::StatusCode, message: String) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::Unauthorized(message),
        404 => ProviderError::NotFound(message),
        // 429 covers both rate limits and exhausted quota.
        _ => ProviderError::BadResponse(format!("OpenAI returned {}: {}", status, message)),
    }
}

/// Extract the human-readable message from an error body, tolerating
/// non-JSON bodies.
pub(super) async fn error_body_message(response: reqwest::Response) -> String {
    let raw = response.text().await.unwrap_or_default();
    match serde_json::from_str::<super::types::OpenAIErrorResponse>(&raw) {
        Ok(body) => body.error.message,
        Err(_) => raw,
    }
}
