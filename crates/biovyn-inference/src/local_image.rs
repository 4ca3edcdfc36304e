//! Local image-model provider.
//!
//! Opt-in adapter for a locally hosted diffusion service speaking the same
//! JSON-over-HTTP shape as the local text server: POST a model and prompt,
//! receive either a base64 `image` field or a `url` field.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use biovyn_core::{defaults, DiagramPayload, FallbackProvider, ProviderError, ProviderResult};

/// Diagram provider backed by a local image model. First in the image chain
/// when configured; absent by default (`from_env` returns `None` without
/// `BIOVYN_IMAGE_URL`).
pub struct LocalImageProvider {
    client: Client,
    base_url: String,
    model: String,
    timeout_secs: u64,
}

impl LocalImageProvider {
    /// Create a provider against the given service.
    pub fn new(base_url: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!(
            subsystem = "providers",
            component = "local_image",
            base_url = %base_url,
            model = %model,
            "Initializing local image provider"
        );

        Self {
            client,
            base_url,
            model,
            timeout_secs,
        }
    }

    /// Create from environment variables. Returns `None` when
    /// `BIOVYN_IMAGE_URL` is unset or empty. The local image service is
    /// opt-in, unlike the local text server.
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var("BIOVYN_IMAGE_URL").ok()?;
        if base_url.is_empty() {
            return None;
        }
        let model = std::env::var("BIOVYN_LOCAL_IMAGE_MODEL")
            .unwrap_or_else(|_| defaults::LOCAL_IMAGE_MODEL.to_string());
        let timeout_secs = std::env::var("BIOVYN_LOCAL_IMAGE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults::LOCAL_IMAGE_TIMEOUT_SECS);
        Some(Self::new(base_url, model, timeout_secs))
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
}

/// Response body: exactly one of `image` (base64) or `url` is expected.
#[derive(Deserialize)]
struct ImageResponse {
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[async_trait]
impl FallbackProvider for LocalImageProvider {
    type Output = DiagramPayload;

    fn id(&self) -> &'static str {
        "local_image"
    }

    #[instrument(skip(self, request), fields(subsystem = "providers", component = "local_image", op = "invoke", model = %self.model, topic = request))]
    async fn invoke(&self, request: &str) -> ProviderResult<DiagramPayload> {
        let start = Instant::now();

        let body = ImageRequest {
            model: self.model.clone(),
            prompt: request.to_string(),
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
                "Image service returned {}: {}",
                status, body
            )));
        }

        let result: ImageResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::BadResponse(format!("Failed to parse response: {}", e)))?;

        let payload = match (result.image, result.url) {
            (Some(encoded), _) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded)
                    .map_err(|e| {
                        ProviderError::BadResponse(format!("Invalid base64 image: {}", e))
                    })?;
                DiagramPayload::Bytes(bytes)
            }
            (None, Some(url)) => DiagramPayload::Url(url),
            (None, None) => {
                return Err(ProviderError::BadResponse(
                    "response carries neither image nor url".to_string(),
                ))
            }
        };

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Local image generation complete"
        );
        Ok(payload)
    }
}
