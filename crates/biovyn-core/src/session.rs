//! Session-scoped conversation log.
//!
//! One log per interactive session, owned by the caller and passed to the
//! resolver layer as a value; the core never reaches into ambient global
//! state. Append-only; chronological order is the only order that matters.

use crate::defaults;
use crate::models::{Role, Turn};

/// Ordered, append-only record of user/assistant turns.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    turns: Vec<Turn>,
}

impl SessionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. Turns are immutable once logged.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in chronological order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of logged turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True when nothing has been logged.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Empty the whole log. The only way a logged turn is ever destroyed.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Compose the conversational prompt for a new question: prior turns as
    /// "User: …" / "Assistant: …" lines, the new user line, and an open
    /// "Assistant:" continuation marker.
    ///
    /// Only the most recent [`defaults::TRANSCRIPT_MAX_TURNS`] turns are
    /// included, bounding prompt size. The log itself is unbounded.
    pub fn transcript(&self, next_question: &str) -> String {
        let start = self.turns.len().saturating_sub(defaults::TRANSCRIPT_MAX_TURNS);
        let mut lines = Vec::with_capacity(self.turns.len() - start + 2);
        for turn in &self.turns[start..] {
            lines.push(format!("{}: {}", turn.role, turn.content));
        }
        lines.push(format!("{}: {}", Role::User, next_question));
        lines.push(format!("{}:", Role::Assistant));
        lines.join("\n")
    }

    /// Plain-text chat export ("You:" / "BiovynAI:" lines), suitable for a
    /// download button.
    pub fn export(&self) -> String {
        self.turns
            .iter()
            .map(|turn| match turn.role {
                Role::User => format!("You: {}\n", turn.content),
                Role::Assistant => format!("BiovynAI: {}\n", turn.content),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
