//! Error types for validation and JSON transport
//!
//! - [`SchemaError`]: first structural violation found in a JSON value
//! - [`ImportError`]: JSON text that could not become a [`Document`](persona_model::Document)
//! - [`SerializeError`]: a document that could not be encoded

use persona_model::JsonPath;

/// What is wrong at a [`SchemaError`] location
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaErrorKind {
    /// Required key absent (or null)
    #[error("missing required key")]
    Missing,

    /// Value has the wrong JSON type
    #[error("expected {expected}, found {found}")]
    WrongType {
        /// Expected JSON type, e.g. `"object"`
        expected: &'static str,
        /// Type found, or the literal number
        found: String,
    },

    /// Value outside a closed set
    #[error("invalid value '{value}', expected one of: {expected}")]
    NotInSet {
        /// Offending value
        value: String,
        /// Comma-separated allowed values
        expected: String,
    },
}

/// Fail-fast validation error
///
/// Displays as `"{path}: {message}"`, e.g.
/// `personas.partner-maria.type: invalid value 'unknown-type', expected one of: ...`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}: {kind}")]
pub struct SchemaError {
    path: JsonPath,
    kind: SchemaErrorKind,
}

impl SchemaError {
    /// Create error at path
    #[inline]
    #[must_use]
    pub fn new(path: JsonPath, kind: SchemaErrorKind) -> Self {
        Self { path, kind }
    }

    /// Location of the violation
    #[inline]
    #[must_use]
    pub fn path(&self) -> &JsonPath {
        &self.path
    }

    /// Kind of violation
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &SchemaErrorKind {
        &self.kind
    }

    /// Human-readable message without the path
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub(crate) fn missing(path: JsonPath) -> Self {
        Self::new(path, SchemaErrorKind::Missing)
    }

    pub(crate) fn wrong_type(
        path: JsonPath,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::new(
            path,
            SchemaErrorKind::WrongType {
                expected,
                found: found.into(),
            },
        )
    }

    pub(crate) fn not_in_set(path: JsonPath, value: impl Into<String>, expected: String) -> Self {
        Self::new(
            path,
            SchemaErrorKind::NotInSet {
                value: value.into(),
                expected,
            },
        )
    }
}

/// Errors importing a document from JSON text
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// Text is not JSON; validation never ran
    #[error(transparent)]
    Syntax(serde_json::Error),

    /// JSON does not have the document shape
    #[error("invalid document: {0}")]
    Schema(#[from] SchemaError),

    /// Valid shape that still failed to decode
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

impl ImportError {
    /// Validation error, if this is one
    #[must_use]
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

/// Errors exporting a document to JSON text
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// JSON encoding failed
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
