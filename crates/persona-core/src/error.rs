//! Error types for the persona pipeline
//!
//! Extraction itself never fails; errors come from configuration, batch
//! bookkeeping and the strict JSON boundary.

use persona_extract::ConfigError;
use persona_schema::{ImportError, SchemaError, SerializeError};

/// Main pipeline error type
#[derive(Debug, thiserror::Error)]
pub enum PersonaError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Two batch sources share a persona id
    #[error("duplicate persona id in batch: '{0}'")]
    DuplicatePersonaId(String),

    /// Document failed validation
    #[error("validation failed: {0}")]
    Schema(#[from] SchemaError),

    /// Document could not be imported
    #[error("import failed: {0}")]
    Import(#[from] ImportError),

    /// Document could not be exported
    #[error("export failed: {0}")]
    Serialize(#[from] SerializeError),
}

impl PersonaError {
    /// Path of the offending location, for validation failures
    #[must_use]
    pub fn schema_path(&self) -> Option<String> {
        match self {
            Self::Schema(e) => Some(e.path().to_string()),
            Self::Import(e) => e.schema_error().map(|e| e.path().to_string()),
            _ => None,
        }
    }
}

/// Result alias for pipeline operations
pub type PersonaResult<T> = Result<T, PersonaError>;
