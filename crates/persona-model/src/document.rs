//! Persona document root
//!
//! A [`Document`] is an immutable snapshot: a persona registry plus a layer
//! content registry. Layer references that point at missing content are
//! tolerated and surface as `None`.

use crate::layer::LayerContent;
use crate::persona::{LayerMeta, Persona};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Free-form descriptive metadata
///
/// The well-known keys are lifted out only when they hold strings; any
/// other value stays in `extra` so every JSON object is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    /// Creation date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Document version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Any other keys, preserved verbatim
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Metadata {
    /// Create empty metadata
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With project name
    #[inline]
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// With creation date
    #[inline]
    #[must_use]
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = Some(created_at.into());
        self
    }

    /// With version
    #[inline]
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

fn take_string(map: &mut IndexMap<String, Value>, key: &str) -> Option<String> {
    if !matches!(map.get(key), Some(Value::String(_))) {
        return None;
    }
    match map.shift_remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut extra = IndexMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            project_name: take_string(&mut extra, "projectName"),
            created_at: take_string(&mut extra, "createdAt"),
            version: take_string(&mut extra, "version"),
            extra,
        })
    }
}

/// Persona document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Personas by identifier
    pub personas: IndexMap<String, Persona>,
    /// Layer content by layer identifier
    pub layer_content: IndexMap<String, LayerContent>,
    /// Optional descriptive metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Document {
    /// Create empty document
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With metadata
    #[inline]
    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Number of personas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Whether the document has no personas
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Persona identifiers in insertion order
    pub fn persona_ids(&self) -> impl Iterator<Item = &str> {
        self.personas.keys().map(String::as_str)
    }

    /// Look up a persona
    #[inline]
    #[must_use]
    pub fn persona(&self, id: &str) -> Option<&Persona> {
        self.personas.get(id)
    }

    /// Content for a layer reference, `None` if the reference dangles
    #[inline]
    #[must_use]
    pub fn layer_content(&self, layer: &LayerMeta) -> Option<&LayerContent> {
        self.layer_content.get(&layer.id)
    }

    /// A persona's layers paired with their content
    ///
    /// Returns `None` if the persona does not exist.
    #[must_use]
    pub fn layers_for(&self, persona_id: &str) -> Option<Vec<(&LayerMeta, Option<&LayerContent>)>> {
        let persona = self.personas.get(persona_id)?;
        Some(
            persona
                .layers
                .iter()
                .map(|layer| (layer, self.layer_content(layer)))
                .collect(),
        )
    }

    /// Layer references with no matching content, as `(persona id, layer id)`
    #[must_use]
    pub fn dangling_layers(&self) -> Vec<(&str, &str)> {
        self.personas
            .iter()
            .flat_map(|(id, persona)| {
                persona
                    .layers
                    .iter()
                    .filter(|layer| !self.layer_content.contains_key(&layer.id))
                    .map(move |layer| (id.as_str(), layer.id.as_str()))
            })
            .collect()
    }

    /// Fold another document into this one
    ///
    /// Incoming entries replace existing entries with the same key in place.
    /// Incoming metadata replaces existing metadata only when present.
    pub fn merge(&mut self, other: Document) {
        self.personas.extend(other.personas);
        self.layer_content.extend(other.layer_content);
        if other.metadata.is_some() {
            self.metadata = other.metadata;
        }
    }
}

impl FromIterator<Document> for Document {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        let mut merged = Document::new();
        for doc in iter {
            merged.merge(doc);
        }
        merged
    }
}
