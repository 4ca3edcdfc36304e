//! Static diagram lookup provider.

use async_trait::async_trait;
use tracing::debug;

use biovyn_core::{defaults, DiagramPayload, FallbackProvider, ProviderError, ProviderResult};

/// Ordered keyword → reference-URL table for curated diagrams.
///
/// Matching is containment of the key in the lowercased topic; the first
/// match in table order wins. The table is fixed at construction and never
/// mutated at runtime.
#[derive(Debug, Clone)]
pub struct DiagramLibrary {
    entries: Vec<(String, String)>,
}

impl DiagramLibrary {
    /// The built-in curated table.
    pub fn new() -> Self {
        Self::with_entries(
            defaults::DIAGRAM_LIBRARY
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    /// A custom table. Keys are lowercased on the way in; order is
    /// preserved and significant.
    pub fn with_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v))
                .collect(),
        }
    }

    /// First entry whose key is contained in the lowercased topic.
    pub fn find(&self, topic: &str) -> Option<&str> {
        let lower = topic.to_lowercase();
        self.entries
            .iter()
            .find(|(key, _)| lower.contains(key.as_str()))
            .map(|(_, url)| url.as_str())
    }

    /// Number of table entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DiagramLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Diagram provider over a [`DiagramLibrary`]. A topic with no matching key
/// is a `NotFound` failure, letting the chain fall through to the terminal
/// placeholder.
pub struct StaticLookupProvider {
    library: DiagramLibrary,
}

impl StaticLookupProvider {
    /// Provider over the built-in table.
    pub fn new() -> Self {
        Self {
            library: DiagramLibrary::new(),
        }
    }

    /// Provider over a custom table.
    pub fn with_library(library: DiagramLibrary) -> Self {
        Self { library }
    }
}

impl Default for StaticLookupProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FallbackProvider for StaticLookupProvider {
    type Output = DiagramPayload;

    fn id(&self) -> &'static str {
        "lookup"
    }

    async fn invoke(&self, request: &str) -> ProviderResult<DiagramPayload> {
        match self.library.find(request) {
            Some(url) => {
                debug!(
                    subsystem = "providers",
                    component = "lookup",
                    topic = request,
                    url,
                    "Library hit"
                );
                Ok(DiagramPayload::Url(url.to_string()))
            }
            None => Err(ProviderError::NotFound(format!(
                "no library entry for topic: {}",
                request
            ))),
        }
    }
}
