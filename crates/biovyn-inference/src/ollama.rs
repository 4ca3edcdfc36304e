//! Ollama local text provider.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use biovyn_core::{defaults, FallbackProvider, ProviderError, ProviderResult};

/// Default Ollama endpoint.
pub const DEFAULT_OLLAMA_URL: &str = defaults::OLLAMA_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = defaults::LOCAL_GEN_MODEL;

/// Timeout for generation requests (seconds).
pub const GEN_TIMEOUT_SECS: u64 = defaults::LOCAL_GEN_TIMEOUT_SECS;

/// Local text provider backed by an Ollama server's `/api/generate`
/// endpoint. Tried first in the default text chain.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl OllamaProvider {
    /// Create a provider with default settings.
    pub fn new() -> Self {
        Self::with_config(
            DEFAULT_OLLAMA_URL.to_string(),
            DEFAULT_GEN_MODEL.to_string(),
            GEN_TIMEOUT_SECS,
        )
    }

    /// Create a provider with custom configuration.
    pub fn with_config(base_url: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "providers",
            component = "ollama",
            base_url = %base_url,
            model = %model,
            "Initializing Ollama provider"
        );

        Self {
            client,
            base_url,
            model,
            timeout_secs,
        }
    }

    /// Create from environment variables (`OLLAMA_URL`,
    /// `BIOVYN_LOCAL_MODEL`, `BIOVYN_LOCAL_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("OLLAMA_URL").unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string());
        let model =
            std::env::var("BIOVYN_LOCAL_MODEL").unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string());
        let timeout_secs = std::env::var("BIOVYN_LOCAL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(GEN_TIMEOUT_SECS);

        Self::with_config(base_url, model, timeout_secs)
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The configured request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Probe the server's `/api/tags` endpoint.
    pub async fn health_check(&self) -> bool {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                info!("Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!("Ollama health check failed: {}", resp.status());
                false
            }
            Err(e) => {
                warn!("Ollama health check error: {}", e);
                false
            }
        }
    }
}

impl Default for OllamaProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Request payload for `/api/generate`.
#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from `/api/generate`. The `response` field must be present; a
/// 200 without it is a malformed body.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[async_trait]
impl FallbackProvider for OllamaProvider {
    type Output = String;

    fn id(&self) -> &'static str {
        "ollama"
    }

    #[instrument(skip(self, request), fields(subsystem = "providers", component = "ollama", op = "invoke", model = %self.model, prompt_len = request.len()))]
    async fn invoke(&self, request: &str) -> ProviderResult<String> {
        let start = Instant::now();

        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: request.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(Duration::from_secs(self.timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(Duration::from_secs(self.timeout_secs))
                } else {
                    ProviderError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::BadResponse(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(format!("Failed to parse response: {}", e)))?;

        let content = result.response.trim().to_string();
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = content.len(),
            duration_ms = elapsed,
            "Local generation complete"
        );
        if elapsed > 5000 {
            warn!(
                duration_ms = elapsed,
                prompt_len = request.len(),
                slow = true,
                "Slow local generation"
            );
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_OLLAMA_URL, "http://127.0.0.1:11434");
        assert_eq!(DEFAULT_GEN_MODEL, "llama3:3b");
        assert_eq!(GEN_TIMEOUT_SECS, 10);
    }

    #[test]
    fn test_default_config() {
        let provider = OllamaProvider::new();
        assert_eq!(provider.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(provider.model(), DEFAULT_GEN_MODEL);
        assert_eq!(provider.timeout(), Duration::from_secs(GEN_TIMEOUT_SECS));
    }

    #[test]
    fn test_custom_config() {
        let provider =
            OllamaProvider::with_config("http://custom:1234".to_string(), "llama3:8b".to_string(), 20);
        assert_eq!(provider.base_url, "http://custom:1234");
        assert_eq!(provider.model(), "llama3:8b");
        assert_eq!(provider.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_provider_id() {
        assert_eq!(OllamaProvider::new().id(), "ollama");
    }

    #[test]
    fn test_generate_request_serialization() {
        let request = GenerateRequest {
            model: "llama3:3b".to_string(),
            prompt: "What is a cell?".to_string(),
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3:3b");
        assert_eq!(json["prompt"], "What is a cell?");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_generate_response_deserialization() {
        let json = r#"{"model": "llama3:3b", "response": "  A cell is the basic unit of life. ", "done": true}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.response, "  A cell is the basic unit of life. ");
    }

    #[test]
    fn test_generate_response_missing_field_is_error() {
        let json = r#"{"model": "llama3:3b", "done": true}"#;
        assert!(serde_json::from_str::<GenerateResponse>(json).is_err());
    }
}
