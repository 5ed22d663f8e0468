//! Extractor configuration
//!
//! The defaults describe the four-layer persona template. A TOML file can
//! override any part of it; omitted keys keep their defaults.

use crate::text::{DEFAULT_EVIDENCE_SOURCE, DEFAULT_QUOTE_SOURCE};
use persona_model::{LayerKind, LAYER_COUNT};
use serde::{Deserialize, Serialize};

/// How to find and read one layer of the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerTemplate {
    /// Layer title written to `LayerMeta::title`
    pub title: String,
    /// Layer subtitle written to `LayerMeta::subtitle`
    pub subtitle: String,
    /// Heading keywords, tried in order
    pub keywords: Vec<String>,
    /// Content variant produced for this layer
    pub kind: LayerKind,
    /// Field labels (fields), list labels (sections) or the narrative
    /// label (solution, first entry)
    #[serde(default)]
    pub labels: Vec<String>,
    /// Label of the gaps list (solution only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gaps_label: Option<String>,
}

impl LayerTemplate {
    fn new(
        title: &str,
        subtitle: &str,
        keywords: &[&str],
        kind: LayerKind,
        labels: &[&str],
    ) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            kind,
            labels: labels.iter().map(|l| (*l).to_string()).collect(),
            gaps_label: None,
        }
    }

    /// Keywords as string slices
    #[must_use]
    pub fn keyword_refs(&self) -> Vec<&str> {
        self.keywords.iter().map(String::as_str).collect()
    }

    /// Narrative label for solution layers
    #[must_use]
    pub fn narrative_label(&self) -> &str {
        self.labels.first().map_or("Current Solutions", String::as_str)
    }

    /// The four layers of the persona template
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        let mut solutions = Self::new(
            "Current Solutions",
            "How they cope today",
            &["Layer 4", "Current Solutions"],
            LayerKind::Solution,
            &["Current Solutions"],
        );
        solutions.gaps_label = Some("Gaps".to_string());

        vec![
            Self::new(
                "Requester",
                "Who they are",
                &["Layer 1", "Requester"],
                LayerKind::Fields,
                &["First Name", "Age", "Role", "Organization", "Thinks / Feels", "Says / Does"],
            ),
            Self::new(
                "Field of Application",
                "Their world",
                &["Layer 2", "Field of Application"],
                LayerKind::Fields,
                &["Environment", "Sees", "Hears", "Influences", "Constraints"],
            ),
            Self::new(
                "Activities and Challenges",
                "What they do and struggle with",
                &["Layer 3", "Activities and Challenges", "Activities & Challenges"],
                LayerKind::Sections,
                &["Activities", "Challenges", "Pain Points", "Needs"],
            ),
            solutions,
        ]
    }
}

/// Extractor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Layer templates, in layer order
    pub layers: Vec<LayerTemplate>,
    /// Source used when a layer has no evidence notes
    pub default_evidence_source: String,
    /// Source used for quotes without a source clause
    pub default_quote_source: String,
    /// Log every fallback at warn level instead of debug
    pub strict: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            layers: LayerTemplate::defaults(),
            default_evidence_source: DEFAULT_EVIDENCE_SOURCE.to_string(),
            default_quote_source: DEFAULT_QUOTE_SOURCE.to_string(),
            strict: false,
        }
    }
}

impl ExtractorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strict logging
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// With default evidence source
    #[inline]
    #[must_use]
    pub fn with_default_evidence_source(mut self, source: impl Into<String>) -> Self {
        self.default_evidence_source = source.into();
        self
    }

    /// With default quote source
    #[inline]
    #[must_use]
    pub fn with_default_quote_source(mut self, source: impl Into<String>) -> Self {
        self.default_quote_source = source.into();
        self
    }

    /// Parse and validate a TOML configuration
    ///
    /// # Errors
    /// - `ConfigError::Toml` if the text is not valid TOML for this shape
    /// - `ConfigError::InvalidTemplate` if the layer templates are unusable
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the layer templates
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidTemplate` for the first unusable template.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layers.len() != LAYER_COUNT {
            return Err(ConfigError::LayerCount {
                expected: LAYER_COUNT,
                actual: self.layers.len(),
            });
        }

        for (index, layer) in self.layers.iter().enumerate() {
            let invalid = |reason: &str| ConfigError::InvalidTemplate {
                layer: index + 1,
                reason: reason.to_string(),
            };
            if layer.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(invalid("no heading keywords"));
            }
            if layer.kind != LayerKind::Solution && layer.labels.is_empty() {
                return Err(invalid("no labels"));
            }
            if layer.gaps_label.is_some() && layer.kind != LayerKind::Solution {
                return Err(invalid("gaps label on a non-solution layer"));
            }
        }

        Ok(())
    }
}

/// Errors loading extractor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or shape error
    #[error("invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Wrong number of layer templates
    #[error("expected {expected} layer templates, got {actual}")]
    LayerCount {
        /// Required number of layers
        expected: usize,
        /// Number of layers configured
        actual: usize,
    },

    /// A layer template cannot be used
    #[error("layer {layer} template invalid: {reason}")]
    InvalidTemplate {
        /// Layer number (1-based)
        layer: usize,
        /// What makes the template unusable
        reason: String,
    },
}
