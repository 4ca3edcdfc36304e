//! # biovyn-inference
//!
//! Provider adapters and the fallback chain resolver for BiovynAI.
//!
//! This crate provides:
//! - Uniform provider adapters over the local inference server, the cloud
//!   chat/image APIs, the curated diagram lookup table, and the terminal
//!   placeholder/offline responders
//! - The fallback chain resolver: ordered attempts, per-call timeouts,
//!   failure swallowing, guaranteed result
//! - Environment-driven chain assembly
//! - The `ChatSession` facade tying a session log to the resolver
//!
//! # Feature Flags
//!
//! - `ollama` (default): local text provider
//! - `openai` (default): cloud chat and image providers
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use biovyn_inference::{resolver_from_env, ChatSession};
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = Arc::new(resolver_from_env().unwrap());
//!     let mut session = ChatSession::new(resolver);
//!
//!     let reply = session.ask("What is a mitochondria?", false).await;
//!     println!("[{}] {}", reply.source, reply.payload);
//!
//!     if let Some(topic) = session.offer_diagram().map(str::to_string) {
//!         let diagram = session.diagram(&topic).await;
//!         println!("diagram from {}", diagram.source);
//!     }
//! }
//! ```

pub mod chat;
pub mod config;
pub mod local_image;
pub mod lookup;
pub mod placeholder;
pub mod resolver;

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "openai")]
pub mod openai;

// Scripted providers for chain tests
#[cfg(test)]
pub mod mock;

// Re-export core types
pub use biovyn_core::*;

pub use chat::ChatSession;
pub use config::resolver_from_env;
pub use local_image::LocalImageProvider;
pub use lookup::{DiagramLibrary, StaticLookupProvider};
pub use placeholder::{OfflineTextResponder, PlaceholderDiagram};
pub use resolver::{ChainEntry, Resolver, ResolverBuilder};

#[cfg(feature = "ollama")]
pub use ollama::OllamaProvider;

#[cfg(feature = "openai")]
pub use openai::{OpenAIChatProvider, OpenAIConfig, OpenAIImageProvider};
