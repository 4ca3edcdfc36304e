//! Environment-driven resolver assembly.
//!
//! Builds the default provider chains from environment variables. The local
//! text server is always registered; cloud providers are opt-in via
//! `OPENAI_API_KEY`; the local image service is opt-in via
//! `BIOVYN_IMAGE_URL`; the static lookup table and the terminal adapters
//! are always present. Credentials are read from the environment only,
//! never hard-coded.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use biovyn_core::Result;

use crate::local_image::LocalImageProvider;
use crate::lookup::StaticLookupProvider;
use crate::resolver::{Resolver, ResolverBuilder};

#[cfg(feature = "ollama")]
use crate::ollama::OllamaProvider;
#[cfg(feature = "openai")]
use crate::openai::{OpenAIChatProvider, OpenAIConfig, OpenAIImageProvider};

/// Chain position of local providers.
pub const PRIORITY_LOCAL: u8 = 0;

/// Chain position of cloud providers.
pub const PRIORITY_CLOUD: u8 = 1;

/// Chain position of the static lookup table.
pub const PRIORITY_LOOKUP: u8 = 2;

/// Grace added to each adapter's own request timeout for the chain's outer
/// bound, so the adapter normally reports its own timeout first.
const CHAIN_TIMEOUT_GRACE: Duration = Duration::from_secs(1);

/// The lookup table does no I/O; a second is already generous.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(1);

/// Build the default resolver from environment variables.
///
/// Registered in priority order: text = local server, then cloud chat when a
/// key is present; diagrams = local image service (opt-in), cloud images
/// (key-gated), then the curated lookup table. Terminal adapters close both
/// chains. Fails only when a chain ends up with no providers at all (e.g.
/// every backend feature compiled out).
pub fn resolver_from_env() -> Result<Resolver> {
    let mut builder = Resolver::builder();

    #[cfg(feature = "ollama")]
    {
        let provider = OllamaProvider::from_env();
        let timeout = provider.timeout() + CHAIN_TIMEOUT_GRACE;
        builder = builder.text_provider(PRIORITY_LOCAL, timeout, Arc::new(provider));
    }

    #[cfg(feature = "openai")]
    {
        let config = OpenAIConfig::from_env();
        if config.has_credentials() {
            let chat_timeout =
                Duration::from_secs(config.chat_timeout_secs) + CHAIN_TIMEOUT_GRACE;
            let image_timeout =
                Duration::from_secs(config.image_timeout_secs) + CHAIN_TIMEOUT_GRACE;
            builder = builder
                .text_provider(
                    PRIORITY_CLOUD,
                    chat_timeout,
                    Arc::new(OpenAIChatProvider::new(config.clone())),
                )
                .diagram_provider(
                    PRIORITY_CLOUD,
                    image_timeout,
                    Arc::new(OpenAIImageProvider::new(config)),
                );
        } else {
            info!(
                subsystem = "resolver",
                "OPENAI_API_KEY not set; cloud providers disabled"
            );
        }
    }

    builder = register_local_image(builder);
    builder = builder.diagram_provider(
        PRIORITY_LOOKUP,
        LOOKUP_TIMEOUT,
        Arc::new(StaticLookupProvider::new()),
    );

    builder.build()
}

fn register_local_image(builder: ResolverBuilder) -> ResolverBuilder {
    match LocalImageProvider::from_env() {
        Some(provider) => builder.diagram_provider(
            PRIORITY_LOCAL,
            Duration::from_secs(biovyn_core::defaults::LOCAL_IMAGE_TIMEOUT_SECS)
                + CHAIN_TIMEOUT_GRACE,
            Arc::new(provider),
        ),
        None => {
            info!(
                subsystem = "resolver",
                "BIOVYN_IMAGE_URL not set; local image provider disabled"
            );
            builder
        }
    }
}
