//! Persona Document Model
//!
//! Typed representation of persona documents produced by extraction and
//! accepted by import.
//!
//! # Core Concepts
//!
//! - [`Document`]: persona registry plus layer content registry
//! - [`Persona`]: one interview-derived archetype with four [`LayerMeta`] references
//! - [`LayerContent`]: explicitly tagged layer body (fields, sections or solution)
//! - [`JsonPath`]: dotted/bracketed addressing used by validation errors
//!
//! # Example
//!
//! ```rust
//! use persona_model::{Document, LayerContent};
//!
//! let mut doc = Document::new();
//! doc.layer_content
//!     .insert("maria-layer1".to_string(), LayerContent::empty_fields());
//! assert!(doc.is_empty());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod display;
mod document;
mod layer;
mod path;
mod persona;

pub use display::{StatusDisplay, TypePalette};
pub use document::{Document, Metadata};
pub use layer::{LayerContent, LayerKind, PersonaField, PersonaSection, Quote};
pub use path::{JsonPath, PathError, Segment};
pub use persona::{LayerMeta, Persona, PersonaType, UnknownVariant, ValidationStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of layers in a complete persona
pub const LAYER_COUNT: usize = 4;

/// Derived layer identifier: `"{persona_id}-layer{number}"`
#[inline]
#[must_use]
pub fn layer_id(persona_id: &str, number: usize) -> String {
    format!("{persona_id}-layer{number}")
}
