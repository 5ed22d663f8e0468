//! Pipeline configuration and batch types

use crate::error::PersonaError;
use indexmap::IndexMap;
use persona_extract::{ConfigError, ExtractionWarning, ExtractorConfig};
use persona_model::Document;
use serde::{Deserialize, Serialize};

/// Pipeline configuration
///
/// ```toml
/// project_name = "Andes Pilot"
/// version = "1.0"
///
/// [extractor]
/// strict = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extraction template and defaults
    pub extractor: ExtractorConfig,
    /// Stamped into batch metadata as `projectName`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Stamped into batch metadata as `version`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With extractor configuration
    #[inline]
    #[must_use]
    pub fn with_extractor(mut self, extractor: ExtractorConfig) -> Self {
        self.extractor = extractor;
        self
    }

    /// With project name
    #[inline]
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// With document version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse and validate a TOML configuration
    ///
    /// # Errors
    /// Returns `ConfigError` for malformed TOML or unusable layer templates.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.extractor.validate()?;
        Ok(config)
    }
}

/// One persona write-up to extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonaSource {
    /// Persona id, also the prefix of its layer ids
    pub id: String,
    /// Markdown write-up
    pub markdown: String,
}

impl PersonaSource {
    /// Create source
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markdown: markdown.into(),
        }
    }
}

/// Merged result of a batch extraction
#[derive(Debug, Clone, PartialEq)]
pub struct BatchExtraction {
    /// All personas, in input order, with stamped metadata
    pub document: Document,
    /// Warnings per persona id (every id is present, possibly empty)
    pub warnings: IndexMap<String, Vec<ExtractionWarning>>,
}

impl BatchExtraction {
    /// Total number of warnings
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    /// Whether no persona fell back to a default
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warning_count() == 0
    }

    /// Warnings for one persona
    #[must_use]
    pub fn warnings_for(&self, id: &str) -> &[ExtractionWarning] {
        self.warnings.get(id).map(Vec::as_slice).unwrap_or_default()
    }
}

pub(crate) fn check_unique_ids(sources: &[PersonaSource]) -> Result<(), PersonaError> {
    let mut seen = indexmap::IndexSet::with_capacity(sources.len());
    for source in sources {
        if !seen.insert(source.id.as_str()) {
            return Err(PersonaError::DuplicatePersonaId(source.id.clone()));
        }
    }
    Ok(())
}
