//! Centralized default constants for the BiovynAI resolver.
//!
//! **This module is the single source of truth** for all shared default
//! values. Adapters and configuration loaders should reference these
//! constants instead of defining their own magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// LOCAL INFERENCE (OLLAMA)
// =============================================================================

/// Default Ollama base URL.
pub const OLLAMA_URL: &str = "http://127.0.0.1:11434";

/// Default local generation model.
pub const LOCAL_GEN_MODEL: &str = "llama3:3b";

/// Timeout for local generation requests in seconds. The local server is
/// tried first on every question, so a hung daemon must fail fast enough for
/// the cloud fallback to stay interactive.
pub const LOCAL_GEN_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLOUD INFERENCE (OPENAI)
// =============================================================================

/// Default OpenAI API endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default cloud generation model.
pub const CLOUD_GEN_MODEL: &str = "gpt-4o-mini";

/// Timeout for cloud generation requests in seconds.
pub const CLOUD_GEN_TIMEOUT_SECS: u64 = 30;

/// Default cloud image model.
pub const CLOUD_IMAGE_MODEL: &str = "gpt-image-1";

/// Requested size for generated diagrams.
pub const CLOUD_IMAGE_SIZE: &str = "512x512";

/// Timeout for cloud image generation in seconds. Image generation is the
/// slowest provider in any chain; everything after it is local and instant.
pub const CLOUD_IMAGE_TIMEOUT_SECS: u64 = 45;

// =============================================================================
// LOCAL IMAGE SERVICE
// =============================================================================

/// Default local image model.
pub const LOCAL_IMAGE_MODEL: &str = "sd-turbo";

/// Timeout for local image generation in seconds.
pub const LOCAL_IMAGE_TIMEOUT_SECS: u64 = 15;

// =============================================================================
// PROMPTS
// =============================================================================

/// System preamble for the cloud chat provider.
pub const SYSTEM_PREAMBLE: &str =
    "You are BiovynAI, a biology expert who explains clearly and kindly.";

/// Prefix applied to the question when study mode is on.
pub const STUDY_MODE_PREFIX: &str = "Explain this in a clear, educational way:";

/// Template for diagram-style image prompts. `{topic}` is substituted.
pub const DIAGRAM_PROMPT_TEMPLATE: &str =
    "Detailed labeled biology diagram of {topic}, educational, colorful, clean layout";

/// Template for the terminal offline text answer. `{topic}` is substituted.
pub const OFFLINE_TEMPLATE: &str =
    "(Offline Mode) Here's a short summary about {topic}. Diagram placeholders will still work!";

// =============================================================================
// TRANSCRIPT
// =============================================================================

/// Maximum number of logged turns included when composing a transcript
/// prompt. The log itself is unbounded; this bounds prompt size only.
/// 24 turns is 12 full exchanges, a few KB of text worst case.
pub const TRANSCRIPT_MAX_TURNS: usize = 24;

// =============================================================================
// TOPIC CLASSIFICATION
// =============================================================================

/// Biology terms whose presence in a message makes a diagram offer useful.
/// Matching is lowercase substring containment, no stemming or negation
/// handling.
pub const BIO_KEYWORDS: &[&str] = &[
    "cell",
    "dna",
    "rna",
    "photosynthesis",
    "mitochondria",
    "nucleus",
    "chloroplast",
    "neuron",
    "heart",
    "brain",
    "respiration",
    "ecosystem",
    "enzyme",
    "protein",
    "gene",
    "plant",
    "virus",
    "bacteria",
];

// =============================================================================
// DIAGRAM LIBRARY
// =============================================================================

/// Curated keyword → reference-diagram URL table. Order matters: the first
/// key contained in the topic wins. Never mutated at runtime.
pub const DIAGRAM_LIBRARY: &[(&str, &str)] = &[
    (
        "cell",
        "https://upload.wikimedia.org/wikipedia/commons/3/3f/Animal_cell_structure_en.svg",
    ),
    (
        "dna",
        "https://upload.wikimedia.org/wikipedia/commons/8/87/DNA_chemical_structure.svg",
    ),
    (
        "photosynthesis",
        "https://upload.wikimedia.org/wikipedia/commons/3/3e/Photosynthesis_process_diagram_en.svg",
    ),
    (
        "heart",
        "https://upload.wikimedia.org/wikipedia/commons/5/55/Diagram_of_the_human_heart_%28cropped%29.svg",
    ),
    (
        "brain",
        "https://upload.wikimedia.org/wikipedia/commons/4/44/Diagram_showing_the_main_parts_of_the_brain_CRUK_188.svg",
    ),
    (
        "neuron",
        "https://upload.wikimedia.org/wikipedia/commons/b/b5/Neuron.svg",
    ),
    (
        "plant",
        "https://upload.wikimedia.org/wikipedia/commons/f/f5/Plant_cell_structure-en.svg",
    ),
    (
        "virus",
        "https://upload.wikimedia.org/wikipedia/commons/7/77/Virus_Structure.svg",
    ),
    (
        "bacteria",
        "https://upload.wikimedia.org/wikipedia/commons/3/32/Bacterial_cell_structure.svg",
    ),
    (
        "mitochondria",
        "https://upload.wikimedia.org/wikipedia/commons/9/9c/Mitochondrion_structure.svg",
    ),
    (
        "nucleus",
        "https://upload.wikimedia.org/wikipedia/commons/e/e1/Nucleus_diagram.svg",
    ),
    (
        "ecosystem",
        "https://upload.wikimedia.org/wikipedia/commons/7/7e/Ecosystem_diagram.svg",
    ),
];

// =============================================================================
// PLACEHOLDER SYNTHESIS
// =============================================================================

/// Edge length in pixels of the synthesized square placeholder diagram.
pub const PLACEHOLDER_SIZE: u32 = 512;

/// Generic reference diagram served if placeholder synthesis itself is
/// impossible. The terminal adapter must produce something for every topic.
pub const FALLBACK_DIAGRAM_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/3/3f/Animal_cell_structure_en.svg";
