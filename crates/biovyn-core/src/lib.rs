//! # biovyn-core
//!
//! Core types, traits, and abstractions for the BiovynAI resolver.
//!
//! This crate provides the foundational data structures and trait
//! definitions that the adapter/resolver crate depends on:
//! - The `ProviderError` taxonomy and crate-level `Error`
//! - Conversation turns and the append-only session log
//! - Payload types and the usability contract for chain results
//! - The `FallbackProvider` / `TerminalProvider` seams
//! - Keyword-based topic classification
//! - Centralized defaults and structured-logging field names

pub mod classifier;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;
pub mod traits;

// Re-export commonly used types at crate root
pub use classifier::TopicClassifier;
pub use error::{Error, ProviderError, ProviderResult, Result};
pub use models::{
    DiagramPayload, Payload, ProviderKind, Resolution, Role, Turn, FALLBACK_SOURCE,
};
pub use session::SessionLog;
pub use traits::{FallbackProvider, TerminalProvider};
