//! OpenAI chat completion provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, instrument};

use biovyn_core::{defaults, FallbackProvider, ProviderError, ProviderResult};

use super::error::{error_body_message, error_from_status};
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::OpenAIConfig;

/// Cloud text provider over the OpenAI chat completions API. Second in the
/// default text chain, behind the local server.
pub struct OpenAIChatProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIChatProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.chat_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "providers",
            component = "openai_chat",
            base_url = %config.base_url,
            model = %config.chat_model,
            "Initializing OpenAI chat provider"
        );

        Self { client, config }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(OpenAIConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn bearer_token(&self) -> ProviderResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::Unauthorized("no API key configured".to_string()))
    }
}

#[async_trait]
impl FallbackProvider for OpenAIChatProvider {
    type Output = String;

    fn id(&self) -> &'static str {
        "openai_chat"
    }

    #[instrument(skip(self, request), fields(subsystem = "providers", component = "openai_chat", op = "invoke", model = %self.config.chat_model, prompt_len = request.len()))]
    async fn invoke(&self, request: &str) -> ProviderResult<String> {
        let token = self.bearer_token()?;

        let body = ChatCompletionRequest {
            model: self.config.chat_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: defaults::SYSTEM_PREAMBLE.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.to_string(),
                },
            ],
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .timeout(Duration::from_secs(self.config.chat_timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(Duration::from_secs(self.config.chat_timeout_secs))
                } else {
                    ProviderError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = error_body_message(response).await;
            return Err(error_from_status(status, message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| ProviderError::BadResponse("no choices in response".to_string()))?;

        debug!(response_len = content.len(), "Cloud generation complete");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_id() {
        let provider = OpenAIChatProvider::new(OpenAIConfig::default());
        assert_eq!(provider.id(), "openai_chat");
    }

    #[tokio::test]
    async fn test_invoke_without_key_is_unauthorized() {
        let provider = OpenAIChatProvider::new(OpenAIConfig::default());
        let err = provider.invoke("What is DNA?").await.unwrap_err();
        assert!(matches!(err, ProviderError::Unauthorized(_)));
    }

    #[test]
    fn test_config_accessor() {
        let config = OpenAIConfig {
            chat_model: "gpt-4o".to_string(),
            ..Default::default()
        };
        let provider = OpenAIChatProvider::new(config);
        assert_eq!(provider.config().chat_model, "gpt-4o");
    }
}
