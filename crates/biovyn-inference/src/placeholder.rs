//! Terminal adapters: the guaranteed base case of each chain.
//!
//! Neither adapter touches the network or any credential, so neither can
//! fail; both implement [`TerminalProvider`] and carry the `"fallback"`
//! source tag through the resolver.

use image::{Rgb, RgbImage};
use sha2::{Digest, Sha256};

use biovyn_core::{defaults, DiagramPayload, TerminalProvider};

/// Terminal text adapter: a fixed templated offline answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineTextResponder;

impl TerminalProvider for OfflineTextResponder {
    type Output = String;

    fn id(&self) -> &'static str {
        "offline_text"
    }

    fn invoke(&self, request: &str) -> String {
        defaults::OFFLINE_TEMPLATE.replace("{topic}", request)
    }
}

/// Terminal diagram adapter: a synthesized solid-color PNG whose color is
/// derived from a hash of the topic, so the same topic always renders the
/// same placeholder.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderDiagram {
    size: u32,
}

impl PlaceholderDiagram {
    pub fn new() -> Self {
        Self {
            size: defaults::PLACEHOLDER_SIZE,
        }
    }

    /// Placeholder with a custom edge length (tests use small images).
    pub fn with_size(size: u32) -> Self {
        Self { size: size.max(1) }
    }

    fn color_from_topic(topic: &str) -> Rgb<u8> {
        let mut hasher = Sha256::new();
        hasher.update(topic.as_bytes());
        let digest = hasher.finalize();
        Rgb([digest[0], digest[1], digest[2]])
    }

    fn render(&self, topic: &str) -> Option<Vec<u8>> {
        let color = Self::color_from_topic(topic);
        let mut canvas = RgbImage::new(self.size, self.size);
        for pixel in canvas.pixels_mut() {
            *pixel = color;
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        canvas.write_to(&mut buf, image::ImageFormat::Png).ok()?;
        Some(buf.into_inner())
    }
}

impl Default for PlaceholderDiagram {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalProvider for PlaceholderDiagram {
    type Output = DiagramPayload;

    fn id(&self) -> &'static str {
        "placeholder"
    }

    fn invoke(&self, request: &str) -> DiagramPayload {
        match self.render(request) {
            Some(bytes) => DiagramPayload::Bytes(bytes),
            // In-memory PNG encoding does not fail for a valid buffer; the
            // generic reference URL keeps the contract total regardless.
            None => DiagramPayload::Url(defaults::FALLBACK_DIAGRAM_URL.to_string()),
        }
    }
}
