//! Persona Extraction
//!
//! Converts template-shaped persona write-ups (four-layer markdown) into a
//! partial [`Document`](persona_model::Document).
//!
//! # Pipeline
//!
//! ```text
//! text → header fields → section isolation → fields / lists / solution
//! → quotes → Document
//!                                   ↓
//!                          ExtractionWarning (every default taken)
//! ```
//!
//! Extraction never fails. Unrecognised input degrades to documented
//! defaults so callers always get a renderable document.
//!
//! # Example
//!
//! ```rust
//! use persona_extract::transform_markdown_to_data;
//!
//! let doc = transform_markdown_to_data("## Persona: Maria\n**Type:** Partner\n", "maria");
//! assert_eq!(doc.persona("maria").unwrap().title, "Maria");
//! assert_eq!(doc.layer_content.len(), 4);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
mod extractor;
pub mod header;
pub mod text;

pub use config::{ConfigError, ExtractorConfig, LayerTemplate};
pub use extractor::{
    transform_markdown_to_data, Extraction, ExtractionWarning, PersonaExtractor,
    DEFAULT_QUALITY_SCORE,
};
pub use header::{
    detect_persona_type, extract_interview_count, extract_quality_score, extract_title,
    parse_validation_status, UNKNOWN_PERSONA,
};
pub use text::{
    extract_bullets, extract_field_content, extract_list_field, extract_quotes,
    extract_solution, isolate_section, DEFAULT_EVIDENCE_SOURCE, DEFAULT_QUOTE_SOURCE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
