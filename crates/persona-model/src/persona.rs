//! Persona records and their closed classification sets
//!
//! A [`Persona`] is one interview-derived archetype. Its [`PersonaType`] and
//! [`ValidationStatus`] are closed sets; unknown strings never deserialize.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Persona archetype
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum PersonaType {
    /// Organisation partnering with the project
    #[default]
    Partner,
    /// Innovator or solution builder
    Innovator,
    /// Institutional or community stakeholder
    Stakeholder,
    /// End beneficiary
    Beneficiary,
}

impl PersonaType {
    /// All persona types, in keyword-matching priority order
    pub const ALL: [Self; 4] = [
        Self::Partner,
        Self::Innovator,
        Self::Stakeholder,
        Self::Beneficiary,
    ];

    /// Wire name (lowercase)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Partner => "partner",
            Self::Innovator => "innovator",
            Self::Stakeholder => "stakeholder",
            Self::Beneficiary => "beneficiary",
        }
    }

    /// Comma-separated list of valid wire names, for error messages
    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl Display for PersonaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                value: s.to_string(),
                expected: Self::valid_names(),
            })
    }
}

/// How strongly content is backed by direct evidence
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Confirmed by interviews
    Validated,
    /// Derived without direct confirmation
    #[default]
    Inferred,
    /// Partly confirmed, partly inferred
    Hybrid,
}

impl ValidationStatus {
    /// All statuses
    pub const ALL: [Self; 3] = [Self::Validated, Self::Inferred, Self::Hybrid];

    /// Wire name (lowercase)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validated => "validated",
            Self::Inferred => "inferred",
            Self::Hybrid => "hybrid",
        }
    }

    /// Comma-separated list of valid wire names, for error messages
    #[must_use]
    pub fn valid_names() -> String {
        Self::ALL.map(Self::as_str).join(", ")
    }
}

impl Display for ValidationStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                value: s.to_string(),
                expected: Self::valid_names(),
            })
    }
}

/// A string that is not a member of a closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{value}', expected one of: {expected}")]
pub struct UnknownVariant {
    /// Offending value
    pub value: String,
    /// Valid values, comma separated
    pub expected: String,
}

/// Reference from a persona to one of its layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LayerMeta {
    /// Key into `Document::layer_content`
    pub id: String,
    /// Display number ("1".."4" for extracted personas)
    pub number: String,
    /// Layer title
    pub title: String,
    /// Layer subtitle
    pub subtitle: String,
}

/// Interview-derived archetype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    /// Archetype classification
    #[serde(rename = "type")]
    pub persona_type: PersonaType,
    /// Display name
    pub title: String,
    /// Short context line
    pub subtitle: String,
    /// Confidence tag for the persona as a whole
    pub validation_status: ValidationStatus,
    /// Where the evidence comes from
    pub evidence_summary: String,
    /// Number of interviews backing the persona
    pub interview_count: u32,
    /// Quality score, conventionally 1-5
    pub quality_score: i32,
    /// Ordered layer references (four for a complete persona)
    pub layers: Vec<LayerMeta>,
}

impl Persona {
    /// Whether the persona follows the four-layer convention
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.layers.len() == 4
    }
}
