//! Fallback chain resolver.
//!
//! Resolves a request by trying registered providers in ascending priority
//! order and falling back on failure. The chain never raises: every
//! `ProviderError` is converted into "try the next provider", and a
//! mandatory terminal adapter guarantees a usable payload when the
//! registered providers are exhausted.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use biovyn_core::{
    DiagramPayload, Error, FallbackProvider, Payload, ProviderError, ProviderKind, Resolution,
    Result, TerminalProvider, FALLBACK_SOURCE,
};

use crate::placeholder::{OfflineTextResponder, PlaceholderDiagram};

/// One registered fallback candidate: a provider plus its chain position
/// and invocation deadline.
pub struct ChainEntry<P> {
    priority: u8,
    timeout: Duration,
    provider: Arc<dyn FallbackProvider<Output = P>>,
}

impl<P: Payload + Send> ChainEntry<P> {
    /// The provider's stable identifier.
    pub fn id(&self) -> &'static str {
        self.provider.id()
    }

    /// The chain position (lower is tried first).
    pub fn priority(&self) -> u8 {
        self.priority
    }
}

/// An ordered chain of one payload kind, with its terminal base case.
struct Chain<P> {
    kind: ProviderKind,
    entries: Vec<ChainEntry<P>>,
    terminal: Arc<dyn TerminalProvider<Output = P>>,
}

impl<P: Payload + Send> Chain<P> {
    /// Walk the chain: first usable success wins; exhaustion invokes the
    /// terminal adapter. Each attempt is bounded by the entry's timeout on
    /// top of whatever bound the adapter applies internally.
    async fn resolve(&self, request: &str) -> Resolution<P> {
        let started = Instant::now();
        let mut attempts = 0usize;

        for entry in &self.entries {
            let provider = entry.id();
            let outcome = match tokio::time::timeout(entry.timeout, entry.provider.invoke(request))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(ProviderError::Timeout(entry.timeout)),
            };

            match outcome {
                Ok(payload) if payload.is_usable() => {
                    let degraded = attempts > 0;
                    debug!(
                        subsystem = "resolver",
                        component = "chain",
                        kind = %self.kind,
                        provider,
                        attempts,
                        degraded,
                        duration_ms = started.elapsed().as_millis() as u64,
                        "Resolution complete"
                    );
                    return Resolution {
                        payload,
                        source: provider.to_string(),
                        degraded,
                    };
                }
                Ok(_) => {
                    // Success status with nothing usable inside; keep going.
                    let err = ProviderError::EmptyResult(format!("{} returned no payload", provider));
                    warn!(
                        subsystem = "resolver",
                        component = "chain",
                        kind = %self.kind,
                        provider,
                        error = %err,
                        error_kind = err.kind(),
                        "Provider failed, trying next"
                    );
                    attempts += 1;
                }
                Err(err) => {
                    warn!(
                        subsystem = "resolver",
                        component = "chain",
                        kind = %self.kind,
                        provider,
                        error = %err,
                        error_kind = err.kind(),
                        "Provider failed, trying next"
                    );
                    attempts += 1;
                }
            }
        }

        warn!(
            subsystem = "resolver",
            component = "chain",
            kind = %self.kind,
            attempts,
            duration_ms = started.elapsed().as_millis() as u64,
            degraded = true,
            "All providers failed, using terminal adapter"
        );
        Resolution {
            payload: self.terminal.invoke(request),
            source: FALLBACK_SOURCE.to_string(),
            degraded: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Stateless, reentrant resolver over one text chain and one diagram chain.
///
/// Safe to share across sessions behind an `Arc`; the only shared state is
/// the immutable provider registry itself.
pub struct Resolver {
    text: Chain<String>,
    diagram: Chain<DiagramPayload>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field(
                "text",
                &self.text.entries.iter().map(|e| e.id()).collect::<Vec<_>>(),
            )
            .field(
                "diagram",
                &self.diagram.entries.iter().map(|e| e.id()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Resolver {
    /// Start building a resolver.
    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolve a composed prompt through the text chain. Never fails.
    #[instrument(skip(self, prompt), fields(subsystem = "resolver", op = "resolve_text", prompt_len = prompt.len()))]
    pub async fn resolve_text(&self, prompt: &str) -> Resolution<String> {
        self.text.resolve(prompt).await
    }

    /// Resolve a diagram topic through the image chain. Never fails.
    #[instrument(skip(self, topic), fields(subsystem = "resolver", op = "resolve_diagram", topic = topic))]
    pub async fn resolve_diagram(&self, topic: &str) -> Resolution<DiagramPayload> {
        self.diagram.resolve(topic).await
    }

    /// Registered text providers in attempt order.
    pub fn text_chain(&self) -> &[ChainEntry<String>] {
        &self.text.entries
    }

    /// Registered diagram providers in attempt order.
    pub fn diagram_chain(&self) -> &[ChainEntry<DiagramPayload>] {
        &self.diagram.entries
    }
}

/// Builder for [`Resolver`]. Registration order breaks priority ties.
pub struct ResolverBuilder {
    text: Vec<ChainEntry<String>>,
    diagram: Vec<ChainEntry<DiagramPayload>>,
    terminal_text: Arc<dyn TerminalProvider<Output = String>>,
    terminal_diagram: Arc<dyn TerminalProvider<Output = DiagramPayload>>,
}

impl ResolverBuilder {
    /// Builder with the default terminal adapters.
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            diagram: Vec::new(),
            terminal_text: Arc::new(OfflineTextResponder),
            terminal_diagram: Arc::new(PlaceholderDiagram::new()),
        }
    }

    /// Register a text provider at the given priority.
    pub fn text_provider(
        mut self,
        priority: u8,
        timeout: Duration,
        provider: Arc<dyn FallbackProvider<Output = String>>,
    ) -> Self {
        self.text.push(ChainEntry {
            priority,
            timeout,
            provider,
        });
        self
    }

    /// Register a diagram provider at the given priority.
    pub fn diagram_provider(
        mut self,
        priority: u8,
        timeout: Duration,
        provider: Arc<dyn FallbackProvider<Output = DiagramPayload>>,
    ) -> Self {
        self.diagram.push(ChainEntry {
            priority,
            timeout,
            provider,
        });
        self
    }

    /// Override the terminal text adapter.
    pub fn terminal_text(mut self, terminal: Arc<dyn TerminalProvider<Output = String>>) -> Self {
        self.terminal_text = terminal;
        self
    }

    /// Override the terminal diagram adapter.
    pub fn terminal_diagram(
        mut self,
        terminal: Arc<dyn TerminalProvider<Output = DiagramPayload>>,
    ) -> Self {
        self.terminal_diagram = terminal;
        self
    }

    /// Validate and build. A kind with no registered providers is a
    /// configuration error here, at startup, never at call time.
    pub fn build(mut self) -> Result<Resolver> {
        if self.text.is_empty() {
            return Err(Error::Config(
                "no text providers registered".to_string(),
            ));
        }
        if self.diagram.is_empty() {
            return Err(Error::Config(
                "no diagram providers registered".to_string(),
            ));
        }

        // Stable: ties keep registration order.
        self.text.sort_by_key(|e| e.priority);
        self.diagram.sort_by_key(|e| e.priority);

        info!(
            subsystem = "resolver",
            text_chain = ?self.text.iter().map(|e| e.id()).collect::<Vec<_>>(),
            diagram_chain = ?self.diagram.iter().map(|e| e.id()).collect::<Vec<_>>(),
            "Resolver built"
        );

        Ok(Resolver {
            text: Chain {
                kind: ProviderKind::Text,
                entries: self.text,
                terminal: self.terminal_text,
            },
            diagram: Chain {
                kind: ProviderKind::Image,
                entries: self.diagram,
                terminal: self.terminal_diagram,
            },
        })
    }
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{CallLog, ScriptedDiagramProvider, ScriptedTextProvider};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn text_resolver(providers: Vec<(u8, ScriptedTextProvider)>) -> Resolver {
        let mut builder = Resolver::builder().diagram_provider(
            0,
            TIMEOUT,
            Arc::new(ScriptedDiagramProvider::new("diagram_stub", CallLog::new())),
        );
        for (priority, provider) in providers {
            builder = builder.text_provider(priority, TIMEOUT, Arc::new(provider));
        }
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn test_first_provider_success_is_not_degraded() {
        let log = CallLog::new();
        let resolver = text_resolver(vec![
            (0, ScriptedTextProvider::new("primary", log.clone()).ok("from primary")),
            (1, ScriptedTextProvider::new("backup", log.clone()).ok("from backup")),
        ]);

        let result = resolver.resolve_text("question").await;
        assert_eq!(result.payload, "from primary");
        assert_eq!(result.source, "primary");
        assert!(!result.degraded);
        assert_eq!(log.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_failure_falls_through_and_marks_degraded() {
        let log = CallLog::new();
        let resolver = text_resolver(vec![
            (
                0,
                ScriptedTextProvider::new("primary", log.clone())
                    .err(ProviderError::Unreachable("refused".to_string())),
            ),
            (1, ScriptedTextProvider::new("backup", log.clone()).ok("from backup")),
        ]);

        let result = resolver.resolve_text("question").await;
        assert_eq!(result.payload, "from backup");
        assert_eq!(result.source, "backup");
        assert!(result.degraded);
        assert_eq!(log.calls(), vec!["primary", "backup"]);
    }

    #[tokio::test]
    async fn test_all_failures_reach_terminal() {
        let log = CallLog::new();
        let resolver = text_resolver(vec![
            (
                0,
                ScriptedTextProvider::new("primary", log.clone())
                    .err(ProviderError::Unreachable("refused".to_string())),
            ),
            (
                1,
                ScriptedTextProvider::new("backup", log.clone())
                    .err(ProviderError::BadResponse("500".to_string())),
            ),
        ]);

        let result = resolver.resolve_text("photosynthesis").await;
        assert!(result.is_fallback());
        assert!(result.degraded);
        assert!(result.payload.contains("photosynthesis"));
        assert_eq!(log.calls(), vec!["primary", "backup"]);
    }

    #[tokio::test]
    async fn test_priority_order_not_registration_order() {
        let log = CallLog::new();
        // Registered backwards; priority must win.
        let resolver = text_resolver(vec![
            (
                2,
                ScriptedTextProvider::new("last", log.clone())
                    .err(ProviderError::Unreachable("x".to_string())),
            ),
            (
                0,
                ScriptedTextProvider::new("first", log.clone())
                    .err(ProviderError::Unreachable("x".to_string())),
            ),
            (
                1,
                ScriptedTextProvider::new("middle", log.clone())
                    .err(ProviderError::Unreachable("x".to_string())),
            ),
        ]);

        resolver.resolve_text("q").await;
        assert_eq!(log.calls(), vec!["first", "middle", "last"]);
    }

    #[tokio::test]
    async fn test_priority_ties_keep_registration_order() {
        let log = CallLog::new();
        let resolver = text_resolver(vec![
            (
                1,
                ScriptedTextProvider::new("tie_a", log.clone())
                    .err(ProviderError::Unreachable("x".to_string())),
            ),
            (
                1,
                ScriptedTextProvider::new("tie_b", log.clone())
                    .err(ProviderError::Unreachable("x".to_string())),
            ),
        ]);

        resolver.resolve_text("q").await;
        assert_eq!(log.calls(), vec!["tie_a", "tie_b"]);
    }

    #[tokio::test]
    async fn test_lower_priority_not_attempted_after_success() {
        let log = CallLog::new();
        let resolver = text_resolver(vec![
            (0, ScriptedTextProvider::new("primary", log.clone()).ok("answer")),
            (
                1,
                ScriptedTextProvider::new("backup", log.clone()).ok("never used"),
            ),
        ]);

        resolver.resolve_text("q").await;
        assert_eq!(log.calls(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_empty_payload_treated_as_failure() {
        let log = CallLog::new();
        // "Technically 200 OK" with a blank body must not stop the chain.
        let resolver = text_resolver(vec![
            (0, ScriptedTextProvider::new("blank", log.clone()).ok("   ")),
            (1, ScriptedTextProvider::new("backup", log.clone()).ok("real answer")),
        ]);

        let result = resolver.resolve_text("q").await;
        assert_eq!(result.payload, "real answer");
        assert_eq!(result.source, "backup");
        assert!(result.degraded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_provider_times_out_and_chain_continues() {
        let log = CallLog::new();
        let resolver = Resolver::builder()
            .text_provider(
                0,
                Duration::from_secs(2),
                Arc::new(
                    ScriptedTextProvider::new("hung", log.clone())
                        .hang(Duration::from_secs(3600)),
                ),
            )
            .text_provider(
                1,
                TIMEOUT,
                Arc::new(ScriptedTextProvider::new("backup", log.clone()).ok("rescued")),
            )
            .diagram_provider(
                0,
                TIMEOUT,
                Arc::new(ScriptedDiagramProvider::new("diagram_stub", CallLog::new())),
            )
            .build()
            .unwrap();

        let started = tokio::time::Instant::now();
        let result = resolver.resolve_text("q").await;
        assert_eq!(result.payload, "rescued");
        assert!(result.degraded);
        // The hung provider cost its 2s budget, not its 1h sleep.
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(log.calls(), vec!["hung", "backup"]);
    }

    #[tokio::test]
    async fn test_diagram_chain_falls_back_to_placeholder() {
        let log = CallLog::new();
        let resolver = Resolver::builder()
            .text_provider(
                0,
                TIMEOUT,
                Arc::new(ScriptedTextProvider::new("text_stub", CallLog::new()).ok("x")),
            )
            .diagram_provider(
                0,
                TIMEOUT,
                Arc::new(
                    ScriptedDiagramProvider::new("generator", log.clone())
                        .err(ProviderError::Unauthorized("no key".to_string())),
                ),
            )
            .build()
            .unwrap();

        let result = resolver.resolve_diagram("the brain").await;
        assert!(result.is_fallback());
        assert!(result.degraded);
        assert!(result.payload.is_usable());
    }

    #[tokio::test]
    async fn test_diagram_empty_bytes_treated_as_failure() {
        let log = CallLog::new();
        let resolver = Resolver::builder()
            .text_provider(
                0,
                TIMEOUT,
                Arc::new(ScriptedTextProvider::new("text_stub", CallLog::new()).ok("x")),
            )
            .diagram_provider(
                0,
                TIMEOUT,
                Arc::new(
                    ScriptedDiagramProvider::new("null_image", log.clone())
                        .ok(DiagramPayload::Bytes(vec![])),
                ),
            )
            .diagram_provider(
                1,
                TIMEOUT,
                Arc::new(
                    ScriptedDiagramProvider::new("library", log.clone())
                        .ok(DiagramPayload::Url("url-B".to_string())),
                ),
            )
            .build()
            .unwrap();

        let result = resolver.resolve_diagram("cell").await;
        assert_eq!(result.payload, DiagramPayload::Url("url-B".to_string()));
        assert_eq!(result.source, "library");
        assert!(result.degraded);
    }

    #[test]
    fn test_empty_text_chain_is_config_error() {
        let err = Resolver::builder()
            .diagram_provider(
                0,
                TIMEOUT,
                Arc::new(ScriptedDiagramProvider::new("d", CallLog::new())),
            )
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no text providers"));
    }

    #[test]
    fn test_empty_diagram_chain_is_config_error() {
        let err = Resolver::builder()
            .text_provider(
                0,
                TIMEOUT,
                Arc::new(ScriptedTextProvider::new("t", CallLog::new()).ok("x")),
            )
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no diagram providers"));
    }

    #[test]
    fn test_chain_accessors_report_sorted_order() {
        let resolver = text_resolver(vec![
            (3, ScriptedTextProvider::new("c", CallLog::new()).ok("x")),
            (1, ScriptedTextProvider::new("a", CallLog::new()).ok("x")),
            (2, ScriptedTextProvider::new("b", CallLog::new()).ok("x")),
        ]);
        let ids: Vec<&str> = resolver.text_chain().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(resolver.text_chain()[0].priority(), 1);
    }
}
