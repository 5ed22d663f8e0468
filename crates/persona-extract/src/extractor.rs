//! Persona extractor
//!
//! Turns one persona write-up into a partial [`Document`] holding that
//! persona and its four layers. Extraction is total: every miss falls back
//! to a default and is reported as an [`ExtractionWarning`].

use crate::config::{ConfigError, ExtractorConfig, LayerTemplate};
use crate::header::{self, UNKNOWN_PERSONA};
use crate::text;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use persona_model::{
    layer_id, Document, LayerContent, LayerKind, LayerMeta, Persona, PersonaField,
    PersonaSection, PersonaType, ValidationStatus,
};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Quality score used when none is found
pub const DEFAULT_QUALITY_SCORE: i32 = 3;

/// A value that fell back to its default during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExtractionWarning {
    /// No name marker; title is "Unknown Persona"
    TitleDefaulted,
    /// No type keyword; type is partner
    TypeDefaulted,
    /// No resolvable validation status; status is inferred
    StatusDefaulted,
    /// No quality score; score is 3
    QualityScoreDefaulted,
    /// No interview count; count is 0
    InterviewCountDefaulted,
    /// No heading for the layer
    SectionMissing {
        /// Layer number (1-based)
        layer: usize,
    },
    /// Section found but a field or list is missing or empty
    FieldMissing {
        /// Layer number (1-based)
        layer: usize,
        /// Missing label
        label: String,
    },
    /// Section found but has no evidence-note bullets
    EvidenceDefaulted {
        /// Layer number (1-based)
        layer: usize,
    },
}

impl Display for ExtractionWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleDefaulted => write!(f, "title defaulted to '{UNKNOWN_PERSONA}'"),
            Self::TypeDefaulted => write!(f, "type defaulted to '{}'", PersonaType::default()),
            Self::StatusDefaulted => write!(
                f,
                "validation status defaulted to '{}'",
                ValidationStatus::default()
            ),
            Self::QualityScoreDefaulted => {
                write!(f, "quality score defaulted to {DEFAULT_QUALITY_SCORE}")
            }
            Self::InterviewCountDefaulted => write!(f, "interview count defaulted to 0"),
            Self::SectionMissing { layer } => write!(f, "layer {layer} section not found"),
            Self::FieldMissing { layer, label } => {
                write!(f, "layer {layer} field '{label}' not found")
            }
            Self::EvidenceDefaulted { layer } => {
                write!(f, "layer {layer} has no evidence notes")
            }
        }
    }
}

/// Extracted document plus the fallbacks taken to build it
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Partial document with one persona and its layers
    pub document: Document,
    /// Every default that was applied
    pub warnings: Vec<ExtractionWarning>,
}

impl Extraction {
    /// Whether every value came from the source text
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Template-driven persona extractor
#[derive(Debug, Clone, Default)]
pub struct PersonaExtractor {
    config: ExtractorConfig,
}

/// Collects warnings and logs them as they are recorded
struct Warnings<'a> {
    persona_id: &'a str,
    strict: bool,
    items: Vec<ExtractionWarning>,
}

impl Warnings<'_> {
    fn push(&mut self, warning: ExtractionWarning) {
        if self.strict {
            tracing::warn!(persona = self.persona_id, "{warning}");
        } else {
            tracing::debug!(persona = self.persona_id, "{warning}");
        }
        self.items.push(warning);
    }

    fn field_missing(&mut self, found: bool, layer: usize, label: &str) {
        if found {
            self.push(ExtractionWarning::FieldMissing {
                layer,
                label: label.to_string(),
            });
        }
    }

    fn or_default<T>(&mut self, value: Option<T>, default: T, warning: ExtractionWarning) -> T {
        value.unwrap_or_else(|| {
            self.push(warning);
            default
        })
    }
}

impl PersonaExtractor {
    /// Create extractor with the default template
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create extractor with a custom configuration
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not describe exactly
    /// four usable layer templates.
    pub fn with_config(config: ExtractorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract a persona, discarding warnings
    #[must_use]
    pub fn extract(&self, source: &str, persona_id: &str) -> Document {
        self.extract_with_report(source, persona_id).document
    }

    /// Extract a persona and report every default applied
    ///
    /// Layer ids are `"{persona_id}-layer1"` through `"{persona_id}-layer4"`.
    #[must_use]
    pub fn extract_with_report(&self, source: &str, persona_id: &str) -> Extraction {
        let normalized = text::normalize_newlines(source);
        let source: &str = &normalized;
        let mut warnings = Warnings {
            persona_id,
            strict: self.config.strict,
            items: Vec::new(),
        };

        let title = warnings.or_default(
            header::extract_title(source),
            UNKNOWN_PERSONA.to_string(),
            ExtractionWarning::TitleDefaulted,
        );
        let persona_type = warnings.or_default(
            header::detect_persona_type(source),
            PersonaType::default(),
            ExtractionWarning::TypeDefaulted,
        );
        let validation_status = warnings.or_default(
            header::parse_validation_status(source),
            ValidationStatus::default(),
            ExtractionWarning::StatusDefaulted,
        );
        let quality_score = warnings.or_default(
            header::extract_quality_score(source),
            DEFAULT_QUALITY_SCORE,
            ExtractionWarning::QualityScoreDefaulted,
        );
        let interview_count = warnings.or_default(
            header::extract_interview_count(source),
            0,
            ExtractionWarning::InterviewCountDefaulted,
        );

        let mut layers = Vec::with_capacity(self.config.layers.len());
        let mut layer_content = IndexMap::with_capacity(self.config.layers.len());
        for (index, template) in self.config.layers.iter().enumerate() {
            let number = index + 1;
            let id = layer_id(persona_id, number);
            let content = self.extract_layer(source, number, template, &mut warnings);

            layers.push(LayerMeta {
                id: id.clone(),
                number: number.to_string(),
                title: template.title.clone(),
                subtitle: template.subtitle.clone(),
            });
            layer_content.insert(id, content);
        }

        let persona = Persona {
            persona_type,
            title,
            subtitle: header::extract_subtitle(source).unwrap_or_default(),
            validation_status,
            evidence_summary: header::extract_evidence_summary(source).unwrap_or_default(),
            interview_count,
            quality_score,
            layers,
        };

        let mut personas = IndexMap::with_capacity(1);
        personas.insert(persona_id.to_string(), persona);

        Extraction {
            document: Document {
                personas,
                layer_content,
                metadata: None,
            },
            warnings: warnings.items,
        }
    }

    fn extract_layer(
        &self,
        source: &str,
        number: usize,
        template: &LayerTemplate,
        warnings: &mut Warnings<'_>,
    ) -> LayerContent {
        let section = text::isolate_section(source, &template.keyword_refs());
        let found = section.is_some();
        if !found {
            warnings.push(ExtractionWarning::SectionMissing { layer: number });
        }
        let section = section.unwrap_or_default();

        let quotes = text::extract_quotes_with_default(section, &self.config.default_quote_source);
        let quotes = (!quotes.is_empty()).then_some(quotes);

        match template.kind {
            LayerKind::Fields => {
                let attribution = self.layer_source(section, number, found, warnings);
                let fields = template
                    .labels
                    .iter()
                    .filter_map(|label| match text::extract_field_content(section, label) {
                        Some(content) => Some(PersonaField {
                            label: label.clone(),
                            content,
                            source: attribution.clone(),
                            validation: None,
                        }),
                        None => {
                            warnings.field_missing(found, number, label);
                            None
                        }
                    })
                    .collect();
                LayerContent::Fields { fields, quotes }
            }
            LayerKind::Sections => {
                let sections = template
                    .labels
                    .iter()
                    .filter_map(|label| match text::extract_list_field(section, label) {
                        Some(items) => Some(PersonaSection {
                            label: label.clone(),
                            items,
                            validation: None,
                        }),
                        None => {
                            warnings.field_missing(found, number, label);
                            None
                        }
                    })
                    .collect();
                LayerContent::Sections { sections, quotes }
            }
            LayerKind::Solution => {
                let solution = text::extract_solution(
                    section,
                    template.narrative_label(),
                    template.gaps_label.as_deref(),
                );
                if found && solution.source.is_none() {
                    warnings.push(ExtractionWarning::EvidenceDefaulted { layer: number });
                }
                LayerContent::Solution {
                    content: solution.content,
                    source: solution
                        .source
                        .unwrap_or_else(|| self.config.default_evidence_source.clone()),
                    gaps: (!solution.gaps.is_empty()).then_some(solution.gaps),
                    quotes,
                }
            }
        }
    }

    fn layer_source(
        &self,
        section: &str,
        number: usize,
        found: bool,
        warnings: &mut Warnings<'_>,
    ) -> String {
        text::evidence_source(section).unwrap_or_else(|| {
            if found {
                warnings.push(ExtractionWarning::EvidenceDefaulted { layer: number });
            }
            self.config.default_evidence_source.clone()
        })
    }
}

static DEFAULT_EXTRACTOR: Lazy<PersonaExtractor> = Lazy::new(PersonaExtractor::new);

/// Extract one persona write-up with the default template
///
/// Never fails: the result always holds the persona `persona_id` and four
/// layer entries keyed `"{persona_id}-layer1"`..`"{persona_id}-layer4"`.
#[must_use]
pub fn transform_markdown_to_data(source: &str, persona_id: &str) -> Document {
    DEFAULT_EXTRACTOR.extract(source, persona_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_defaults() {
        let extraction = PersonaExtractor::new().extract_with_report("", "p");
        let doc = &extraction.document;
        let persona = doc.persona("p").unwrap();

        assert_eq!(persona.title, UNKNOWN_PERSONA);
        assert_eq!(persona.persona_type, PersonaType::Partner);
        assert_eq!(persona.validation_status, ValidationStatus::Inferred);
        assert_eq!(persona.quality_score, 3);
        assert_eq!(persona.interview_count, 0);
        assert_eq!(persona.layers.len(), 4);
        assert_eq!(
            doc.layer_content.keys().collect::<Vec<_>>(),
            vec!["p-layer1", "p-layer2", "p-layer3", "p-layer4"]
        );

        assert!(extraction.warnings.contains(&ExtractionWarning::TitleDefaulted));
        assert!(extraction
            .warnings
            .contains(&ExtractionWarning::SectionMissing { layer: 4 }));
        assert!(!extraction
            .warnings
            .iter()
            .any(|w| matches!(w, ExtractionWarning::FieldMissing { .. })));
    }

    #[test]
    fn empty_solution_layer_uses_default_source() {
        let doc = transform_markdown_to_data("", "p");
        match &doc.layer_content["p-layer4"] {
            LayerContent::Solution { content, source, gaps, quotes } => {
                assert!(content.is_empty());
                assert_eq!(source, "Interview data");
                assert!(gaps.is_none());
                assert!(quotes.is_none());
            }
            other => panic!("unexpected layer 4 content: {other:?}"),
        }
    }

    #[test]
    fn layer_kinds_follow_template() {
        let doc = transform_markdown_to_data("anything", "x");
        let kinds: Vec<_> = doc.layer_content.values().map(LayerContent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                LayerKind::Fields,
                LayerKind::Fields,
                LayerKind::Sections,
                LayerKind::Solution
            ]
        );
    }

    #[test]
    fn custom_default_sources() {
        let config = ExtractorConfig::new()
            .with_default_evidence_source("Desk research")
            .with_default_quote_source("Workshop");
        let extractor = PersonaExtractor::with_config(config).unwrap();

        let source = "### Layer 1: Requester\n**Role:** Nurse\n\"We wait weeks\" - Ana\n";
        let doc = extractor.extract(source, "ana");
        let layer = &doc.layer_content["ana-layer1"];

        assert_eq!(layer.field("Role").unwrap().source, "Desk research");
        assert_eq!(layer.quotes()[0].source, "Workshop");
    }

    #[test]
    fn incomplete_template_rejected() {
        let mut config = ExtractorConfig::new();
        config.layers.pop();

        let err = PersonaExtractor::with_config(config).unwrap_err();
        assert!(matches!(err, ConfigError::LayerCount { expected: 4, actual: 3 }));
    }

    #[test]
    fn warning_display() {
        let warning = ExtractionWarning::FieldMissing {
            layer: 3,
            label: "Needs".to_string(),
        };
        assert_eq!(warning.to_string(), "layer 3 field 'Needs' not found");
        assert_eq!(
            ExtractionWarning::StatusDefaulted.to_string(),
            "validation status defaulted to 'inferred'"
        );
    }
}
