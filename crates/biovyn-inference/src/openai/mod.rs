//! OpenAI cloud providers: chat completion and diagram generation.

mod chat;
mod error;
mod images;
mod types;

pub use chat::OpenAIChatProvider;
pub use images::OpenAIImageProvider;

use biovyn_core::defaults;

/// Shared configuration for the OpenAI providers.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key. Absent credentials surface as `ProviderError::Unauthorized`
    /// on invocation; keys are never hard-coded.
    pub api_key: Option<String>,
    /// Model for chat completions.
    pub chat_model: String,
    /// Model for image generation.
    pub image_model: String,
    /// Requested image size.
    pub image_size: String,
    /// Chat request timeout in seconds.
    pub chat_timeout_secs: u64,
    /// Image request timeout in seconds.
    pub image_timeout_secs: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OPENAI_URL.to_string(),
            api_key: None,
            chat_model: defaults::CLOUD_GEN_MODEL.to_string(),
            image_model: defaults::CLOUD_IMAGE_MODEL.to_string(),
            image_size: defaults::CLOUD_IMAGE_SIZE.to_string(),
            chat_timeout_secs: defaults::CLOUD_GEN_TIMEOUT_SECS,
            image_timeout_secs: defaults::CLOUD_IMAGE_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Create from environment variables (`OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL`, `BIOVYN_CLOUD_MODEL`, `BIOVYN_IMAGE_MODEL`).
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| defaults::OPENAI_URL.to_string()),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            chat_model: std::env::var("BIOVYN_CLOUD_MODEL")
                .unwrap_or_else(|_| defaults::CLOUD_GEN_MODEL.to_string()),
            image_model: std::env::var("BIOVYN_IMAGE_MODEL")
                .unwrap_or_else(|_| defaults::CLOUD_IMAGE_MODEL.to_string()),
            image_size: std::env::var("BIOVYN_IMAGE_SIZE")
                .unwrap_or_else(|_| defaults::CLOUD_IMAGE_SIZE.to_string()),
            chat_timeout_secs: std::env::var("BIOVYN_CLOUD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::CLOUD_GEN_TIMEOUT_SECS),
            image_timeout_secs: std::env::var("BIOVYN_IMAGE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::CLOUD_IMAGE_TIMEOUT_SECS),
        }
    }

    /// True when a credential is configured.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}
