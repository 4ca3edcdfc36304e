//! Keyword-based topic classification.
//!
//! Decides whether the conversation has touched a topic worth offering a
//! diagram for. Deliberately coarse: lowercase substring containment against
//! a fixed term set, with no stemming, tokenization, or negation handling.
//! A message saying "not about DNA" still matches "dna". Carried as-is from
//! the source behavior; treat as a cheap heuristic, not NLP.

use crate::defaults;

/// Classifier over a fixed keyword set.
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    keywords: Vec<String>,
}

impl TopicClassifier {
    /// Classifier with the built-in biology term set.
    pub fn new() -> Self {
        Self::with_keywords(defaults::BIO_KEYWORDS.iter().map(|k| k.to_string()))
    }

    /// Classifier with a custom term set. Terms are lowercased on the way in.
    pub fn with_keywords(keywords: impl IntoIterator<Item = String>) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// True iff any keyword occurs as a substring of the lowercased text.
    pub fn should_offer_diagram(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.keywords.iter().any(|kw| lower.contains(kw.as_str()))
    }

    /// The keyword set in use.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}
