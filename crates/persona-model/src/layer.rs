//! Layer content variants
//!
//! Layer content is an explicitly tagged sum type. The wire form carries a
//! `kind` discriminator; objects without one (older exports) are classified
//! from the keys they carry.

use crate::persona::{UnknownVariant, ValidationStatus};
use schemars::JsonSchema;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Verbatim attributed excerpt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Quote {
    /// Quoted text, without quote marks
    pub text: String,
    /// Who said it
    pub author: String,
    /// Where it was said
    pub source: String,
}

/// Labeled free-text field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PersonaField {
    /// Field label, e.g. "Thinks / Feels"
    pub label: String,
    /// Field text
    pub content: String,
    /// Evidence attribution
    pub source: String,
    /// Optional confidence tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationStatus>,
}

/// Labeled bullet list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PersonaSection {
    /// Section label, e.g. "Challenges"
    pub label: String,
    /// Bullet items, markers stripped
    pub items: Vec<String>,
    /// Optional confidence tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationStatus>,
}

/// Discriminator for [`LayerContent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Labeled text fields ("who they are", "their world")
    Fields,
    /// Labeled bullet lists ("activities & challenges")
    Sections,
    /// Narrative with attribution ("current solutions")
    Solution,
}

impl LayerKind {
    /// All kinds
    pub const ALL: [Self; 3] = [Self::Fields, Self::Sections, Self::Solution];

    /// Wire name
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Sections => "sections",
            Self::Solution => "solution",
        }
    }

    /// Key that must be present for this kind
    #[inline]
    #[must_use]
    pub const fn required_key(self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Sections => "sections",
            Self::Solution => "content",
        }
    }

    /// Comma-separated list of valid wire names
    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl Display for LayerKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                value: s.to_string(),
                expected: Self::valid_names(),
            })
    }
}

/// Content of one persona layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayerContent {
    /// Field-based layer
    Fields {
        /// Labeled fields in template order
        fields: Vec<PersonaField>,
        /// Supporting quotes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quotes: Option<Vec<Quote>>,
    },
    /// Section-based layer
    Sections {
        /// Labeled bullet lists
        sections: Vec<PersonaSection>,
        /// Supporting quotes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quotes: Option<Vec<Quote>>,
    },
    /// Solution-based layer
    Solution {
        /// Narrative body
        content: String,
        /// Evidence attribution
        source: String,
        /// Known gaps in current solutions
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gaps: Option<Vec<String>>,
        /// Supporting quotes
        #[serde(default, skip_serializing_if = "Option::is_none")]
        quotes: Option<Vec<Quote>>,
    },
}

impl LayerContent {
    /// Empty field-based layer
    #[inline]
    #[must_use]
    pub fn empty_fields() -> Self {
        Self::Fields {
            fields: Vec::new(),
            quotes: None,
        }
    }

    /// Variant discriminator
    #[inline]
    #[must_use]
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Fields { .. } => LayerKind::Fields,
            Self::Sections { .. } => LayerKind::Sections,
            Self::Solution { .. } => LayerKind::Solution,
        }
    }

    /// Quotes attached to this layer (empty if none)
    #[must_use]
    pub fn quotes(&self) -> &[Quote] {
        let quotes = match self {
            Self::Fields { quotes, .. }
            | Self::Sections { quotes, .. }
            | Self::Solution { quotes, .. } => quotes,
        };
        quotes.as_deref().unwrap_or_default()
    }

    /// Fields, if this is a field-based layer
    #[must_use]
    pub fn fields(&self) -> Option<&[PersonaField]> {
        match self {
            Self::Fields { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Sections, if this is a section-based layer
    #[must_use]
    pub fn sections(&self) -> Option<&[PersonaSection]> {
        match self {
            Self::Sections { sections, .. } => Some(sections),
            _ => None,
        }
    }

    /// Find a field by label
    #[must_use]
    pub fn field(&self, label: &str) -> Option<&PersonaField> {
        self.fields()?.iter().find(|f| f.label == label)
    }

    /// Find a section by label
    #[must_use]
    pub fn section(&self, label: &str) -> Option<&PersonaSection> {
        self.sections()?.iter().find(|s| s.label == label)
    }

    /// Whether the layer carries no content at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let body_empty = match self {
            Self::Fields { fields, .. } => fields.is_empty(),
            Self::Sections { sections, .. } => sections.is_empty(),
            Self::Solution { content, gaps, .. } => {
                content.is_empty() && gaps.as_ref().map_or(true, Vec::is_empty)
            }
        };
        body_empty && self.quotes().is_empty()
    }
}

/// Wire form accepting both tagged and untagged layer content
#[derive(Deserialize)]
struct RawLayerContent {
    kind: Option<LayerKind>,
    fields: Option<Vec<PersonaField>>,
    sections: Option<Vec<PersonaSection>>,
    content: Option<String>,
    source: Option<String>,
    gaps: Option<Vec<String>>,
    quotes: Option<Vec<Quote>>,
}

impl RawLayerContent {
    fn inferred_kind(&self) -> LayerKind {
        if self.fields.is_some() {
            LayerKind::Fields
        } else if self.sections.is_some() {
            LayerKind::Sections
        } else if self.content.is_some() {
            LayerKind::Solution
        } else {
            LayerKind::Fields
        }
    }

    fn into_content(self) -> Result<LayerContent, String> {
        let kind = self.kind.unwrap_or_else(|| self.inferred_kind());
        let tagged = self.kind.is_some();
        let missing = |key: &str| format!("missing field `{key}` for layer kind `{kind}`");

        match kind {
            LayerKind::Fields => Ok(LayerContent::Fields {
                fields: match self.fields {
                    Some(fields) => fields,
                    None if tagged => return Err(missing("fields")),
                    None => Vec::new(),
                },
                quotes: self.quotes,
            }),
            LayerKind::Sections => Ok(LayerContent::Sections {
                sections: self.sections.ok_or_else(|| missing("sections"))?,
                quotes: self.quotes,
            }),
            LayerKind::Solution => Ok(LayerContent::Solution {
                content: self.content.ok_or_else(|| missing("content"))?,
                source: self.source.ok_or_else(|| missing("source"))?,
                gaps: self.gaps,
                quotes: self.quotes,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for LayerContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawLayerContent::deserialize(deserializer)?
            .into_content()
            .map_err(D::Error::custom)
    }
}
