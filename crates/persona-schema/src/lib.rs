//! Persona Schema
//!
//! Strict counterpart to extraction: a fail-fast structural validator and
//! the JSON export/import pair built on it.
//!
//! # Example
//!
//! ```rust
//! use persona_model::Document;
//! use persona_schema::{export_to_json, import_from_json};
//!
//! let json = export_to_json(&Document::new()).unwrap();
//! assert_eq!(import_from_json(&json).unwrap(), Document::new());
//!
//! let err = import_from_json(r#"{"personas": {}}"#).unwrap_err();
//! assert_eq!(err.to_string(), "invalid document: layerContent: missing required key");
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod error;
mod schema;
mod serializer;
mod validator;

pub use error::{ImportError, SchemaError, SchemaErrorKind, SerializeError};
pub use schema::document_json_schema;
pub use serializer::{export_to_json, import_from_json, import_from_value};
pub use validator::{validate_document, SchemaValidator};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
