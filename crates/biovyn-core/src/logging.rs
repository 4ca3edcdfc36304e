//! Structured logging schema and field name constants.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, provider registration) |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "resolver", "providers", "session"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "ollama", "openai_chat", "openai_images", "lookup", "chain"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "resolve_text", "resolve_diagram", "invoke", "health_check"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// Provider id attempted or satisfied.
pub const PROVIDER: &str = "provider";

/// Requested payload kind ("text" or "image").
pub const KIND: &str = "kind";

/// Diagram topic being resolved.
pub const TOPIC: &str = "topic";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of failed attempts before the satisfying provider.
pub const ATTEMPTS: &str = "attempts";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for inference.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// True when a lower-priority provider had to satisfy the request.
pub const DEGRADED: &str = "degraded";

/// Error message when an attempt fails.
pub const ERROR_MSG: &str = "error";

/// Error kind tag when an attempt fails.
pub const ERROR_KIND: &str = "error_kind";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
