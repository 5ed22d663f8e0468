//! Persona pipeline
//!
//! Extracts many write-ups in parallel, merges them into one document and
//! moves documents across the JSON boundary.

use crate::error::PersonaResult;
use crate::types::{check_unique_ids, BatchExtraction, PersonaSource, PipelineConfig};
use chrono::{NaiveDate, Utc};
use persona_extract::{Extraction, PersonaExtractor};
use persona_model::{Document, Metadata};
use rayon::prelude::*;
use serde_json::Value;

/// Configured extraction and transport pipeline
#[derive(Debug, Clone, Default)]
pub struct PersonaPipeline {
    config: PipelineConfig,
    extractor: PersonaExtractor,
}

impl PersonaPipeline {
    /// Create pipeline from configuration
    ///
    /// # Errors
    /// Returns `PersonaError::Config` if the extractor templates are unusable.
    pub fn new(config: PipelineConfig) -> PersonaResult<Self> {
        let extractor = PersonaExtractor::with_config(config.extractor.clone())?;
        Ok(Self { config, extractor })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Extract a single persona with its warnings
    #[must_use]
    pub fn extract(&self, markdown: &str, persona_id: &str) -> Extraction {
        self.extractor.extract_with_report(markdown, persona_id)
    }

    /// Extract every source in parallel and merge in input order
    ///
    /// The merged document gets metadata with `createdAt` set to today's
    /// UTC date plus the configured project name and version.
    ///
    /// # Errors
    /// Returns `PersonaError::DuplicatePersonaId` if two sources share an id.
    pub fn extract_all(&self, sources: &[PersonaSource]) -> PersonaResult<BatchExtraction> {
        self.extract_all_on(sources, Utc::now().date_naive())
    }

    fn extract_all_on(
        &self,
        sources: &[PersonaSource],
        date: NaiveDate,
    ) -> PersonaResult<BatchExtraction> {
        check_unique_ids(sources)?;

        let extractions: Vec<Extraction> = sources
            .par_iter()
            .map(|source| self.extract(&source.markdown, &source.id))
            .collect();

        let mut document = Document::new();
        let mut warnings = indexmap::IndexMap::with_capacity(sources.len());
        for (source, extraction) in sources.iter().zip(extractions) {
            document.merge(extraction.document);
            warnings.insert(source.id.clone(), extraction.warnings);
        }
        document.metadata = Some(self.metadata(date));

        let batch = BatchExtraction { document, warnings };
        tracing::info!(
            personas = batch.document.len(),
            warnings = batch.warning_count(),
            "batch extraction complete"
        );
        Ok(batch)
    }

    fn metadata(&self, date: NaiveDate) -> Metadata {
        let mut metadata = Metadata::new().with_created_at(date.to_string());
        metadata.project_name.clone_from(&self.config.project_name);
        metadata.version.clone_from(&self.config.version);
        metadata
    }

    /// Validate a parsed JSON value
    ///
    /// # Errors
    /// Returns `PersonaError::Schema` with the first violation.
    pub fn validate(&self, value: &Value) -> PersonaResult<()> {
        Ok(persona_schema::validate_document(value)?)
    }

    /// Encode a document as indented JSON
    ///
    /// # Errors
    /// Returns `PersonaError::Serialize` if encoding fails.
    pub fn export(&self, document: &Document) -> PersonaResult<String> {
        Ok(persona_schema::export_to_json(document)?)
    }

    /// Parse, validate and decode a document
    ///
    /// # Errors
    /// Returns `PersonaError::Import` for syntax or structural problems.
    pub fn import(&self, text: &str) -> PersonaResult<Document> {
        Ok(persona_schema::import_from_json(text)?)
    }
}
