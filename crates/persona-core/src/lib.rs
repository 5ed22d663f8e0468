//! Persona Core
//!
//! Entry point for turning persona write-ups into validated documents:
//! - Batch extraction in parallel with warnings per persona
//! - Merging into a single document with stamped metadata
//! - Validation and JSON export/import behind one error type
//!
//! # Example
//!
//! ```rust
//! use persona_core::prelude::*;
//!
//! # fn main() -> PersonaResult<()> {
//! let pipeline = PersonaPipeline::new(PipelineConfig::new().with_project_name("Pilot"))?;
//! let batch = pipeline.extract_all(&[
//!     PersonaSource::new("partner-maria", "## Persona: Maria\n**Type:** Partner\n"),
//! ])?;
//!
//! let json = pipeline.export(&batch.document)?;
//! let document = pipeline.import(&json)?;
//! assert_eq!(document.persona("partner-maria").unwrap().title, "Maria");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod error;
pub mod pipeline;
pub mod types;

pub use error::{PersonaError, PersonaResult};
pub use pipeline::PersonaPipeline;
pub use types::{BatchExtraction, PersonaSource, PipelineConfig};

pub use persona_extract::{
    transform_markdown_to_data, ConfigError, Extraction, ExtractionWarning, ExtractorConfig,
    PersonaExtractor,
};
pub use persona_model::{
    Document, LayerContent, LayerKind, LayerMeta, Metadata, Persona, PersonaField,
    PersonaSection, PersonaType, Quote, ValidationStatus,
};
pub use persona_schema::{
    document_json_schema, export_to_json, import_from_json, validate_document, ImportError,
    SchemaError, SerializeError,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with persona documents
    pub use crate::{
        Document, ExtractorConfig, LayerContent, PersonaError, PersonaPipeline, PersonaResult,
        PersonaSource, PersonaType, PipelineConfig, ValidationStatus,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
