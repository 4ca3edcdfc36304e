//! Session-scoped chat facade.
//!
//! Owns one conversation: the turn log, a shared resolver, and the topic
//! classifier. The UI layer is expected to serialize interactions per
//! session (turn-mutating operations take `&mut self`); the resolver behind
//! the `Arc` is reentrant across sessions.

use std::sync::Arc;

use biovyn_core::{
    defaults, DiagramPayload, Resolution, SessionLog, TopicClassifier, Turn,
};

use crate::resolver::Resolver;

/// One user's conversation with BiovynAI.
pub struct ChatSession {
    log: SessionLog,
    resolver: Arc<Resolver>,
    classifier: TopicClassifier,
}

impl ChatSession {
    /// New empty session over a shared resolver.
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self {
            log: SessionLog::new(),
            resolver,
            classifier: TopicClassifier::new(),
        }
    }

    /// New session with a custom classifier.
    pub fn with_classifier(resolver: Arc<Resolver>, classifier: TopicClassifier) -> Self {
        Self {
            log: SessionLog::new(),
            resolver,
            classifier,
        }
    }

    /// Ask a question: logs the user turn, resolves a reply through the
    /// text chain, logs the assistant turn, and returns the resolution.
    ///
    /// Study mode prefixes the question before prompt composition, so every
    /// provider in the chain sees the same framed prompt. The raw question
    /// is what lands in the log.
    pub async fn ask(&mut self, question: &str, study_mode: bool) -> Resolution<String> {
        let framed = if study_mode {
            format!("{} {}", defaults::STUDY_MODE_PREFIX, question)
        } else {
            question.to_string()
        };
        let prompt = self.log.transcript(&framed);

        self.log.append(Turn::user(question));
        let resolution = self.resolver.resolve_text(&prompt).await;
        self.log.append(Turn::assistant(resolution.payload.clone()));
        resolution
    }

    /// Resolve a diagram for a topic through the image chain. Diagrams are
    /// not conversation turns and are not logged.
    pub async fn diagram(&self, topic: &str) -> Resolution<DiagramPayload> {
        self.resolver.resolve_diagram(topic).await
    }

    /// When the latest turn touches a known topic, the topic to offer a
    /// diagram for.
    pub fn offer_diagram(&self) -> Option<&str> {
        let last = self.log.last()?;
        self.classifier
            .should_offer_diagram(&last.content)
            .then_some(last.content.as_str())
    }

    /// Append an externally constructed turn.
    pub fn log_turn(&mut self, turn: Turn) {
        self.log.append(turn);
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[Turn] {
        self.log.turns()
    }

    /// Empty the conversation.
    pub fn clear(&mut self) {
        self.log.clear();
    }

    /// Plain-text export of the conversation.
    pub fn export(&self) -> String {
        self.log.export()
    }
}
