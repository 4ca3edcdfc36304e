//! Core data model for the BiovynAI resolver.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source tag on a [`Resolution`] produced by a terminal adapter.
pub const FALLBACK_SOURCE: &str = "fallback";

// ---------------------------------------------------------------------------
// Conversation turns
// ---------------------------------------------------------------------------

/// Who authored a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "User"),
            Self::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One exchange unit in a conversation. Immutable once created; the session
/// log only ever appends or clears whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// Create a user turn stamped now.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an assistant turn stamped now.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider kinds and payloads
// ---------------------------------------------------------------------------

/// Capability kind a provider serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Text,
    Image,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
        }
    }
}

/// Result of a diagram resolution: raw image bytes from a generator, or a
/// reference URL from the curated library.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramPayload {
    Bytes(Vec<u8>),
    Url(String),
}

/// Usability test for a chain payload.
///
/// A provider returning `Ok` with an unusable payload is treated as a
/// failure and the chain continues; "technically 200 OK" is not the same as
/// "usable result".
pub trait Payload {
    fn is_usable(&self) -> bool;
}

impl Payload for String {
    fn is_usable(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Payload for DiagramPayload {
    fn is_usable(&self) -> bool {
        match self {
            Self::Bytes(bytes) => !bytes.is_empty(),
            Self::Url(url) => !url.trim().is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution outcome
// ---------------------------------------------------------------------------

/// Outcome of one fallback-chain run. Consumed immediately by the caller;
/// not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<P> {
    /// The usable payload.
    pub payload: P,
    /// Id of the provider that satisfied the request, or
    /// [`FALLBACK_SOURCE`] when the terminal adapter produced it.
    pub source: String,
    /// True when one or more higher-priority providers failed first.
    pub degraded: bool,
}

impl<P> Resolution<P> {
    /// True when the terminal adapter produced this result.
    pub fn is_fallback(&self) -> bool {
        self.source == FALLBACK_SOURCE
    }
}
