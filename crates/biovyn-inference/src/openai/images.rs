//! OpenAI image generation provider.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use tracing::{debug, info, instrument};

use biovyn_core::{defaults, DiagramPayload, FallbackProvider, ProviderError, ProviderResult};

use super::error::{error_body_message, error_from_status};
use super::types::{ImageGenerationRequest, ImageGenerationResponse};
use super::OpenAIConfig;

/// Cloud diagram provider over the OpenAI image generations API. The topic
/// is wrapped in a diagram-style prompt before dispatch.
pub struct OpenAIImageProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIImageProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.image_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "providers",
            component = "openai_images",
            base_url = %config.base_url,
            model = %config.image_model,
            size = %config.image_size,
            "Initializing OpenAI image provider"
        );

        Self { client, config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(OpenAIConfig::from_env())
    }

    /// The diagram-style prompt sent for a topic.
    pub fn diagram_prompt(topic: &str) -> String {
        defaults::DIAGRAM_PROMPT_TEMPLATE.replace("{topic}", topic)
    }
}

#[async_trait]
impl FallbackProvider for OpenAIImageProvider {
    type Output = DiagramPayload;

    fn id(&self) -> &'static str {
        "openai_images"
    }

    #[instrument(skip(self, request), fields(subsystem = "providers", component = "openai_images", op = "invoke", model = %self.config.image_model, topic = request))]
    async fn invoke(&self, request: &str) -> ProviderResult<DiagramPayload> {
        let token = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Unauthorized("no API key configured".to_string()))?;

        let body = ImageGenerationRequest {
            model: self.config.image_model.clone(),
            prompt: Self::diagram_prompt(request),
            size: self.config.image_size.clone(),
        };

        let url = format!(
            "{}/images/generations",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .timeout(Duration::from_secs(self.config.image_timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(Duration::from_secs(self.config.image_timeout_secs))
                } else {
                    ProviderError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_body_message(response).await;
            return Err(error_from_status(status, message));
        }

        let result: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(format!("Failed to parse response: {}", e)))?;

        let encoded = result
            .data
            .first()
            .and_then(|d| d.b64_json.as_deref())
            .ok_or_else(|| ProviderError::EmptyResult("no image data returned".to_string()))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| ProviderError::BadResponse(format!("Invalid base64 image: {}", e)))?;

        debug!(image_bytes = bytes.len(), "Diagram generation complete");
        Ok(DiagramPayload::Bytes(bytes))
    }
}
