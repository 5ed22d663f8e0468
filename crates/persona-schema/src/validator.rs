//! Fail-fast document validator
//!
//! Walks a parsed JSON value depth-first and stops at the first violation.
//! Object keys are visited in source order (`serde_json` is built with
//! `preserve_order`).
//!
//! Order of checks:
//! 1. root, `personas`, `layerContent` and optional `metadata` are objects
//! 2. each persona: string fields, then `type` and `validationStatus`
//!    membership, then `interviewCount`/`qualityScore`, then `layers`
//! 3. each layer content entry: optional `kind`, then whichever of
//!    `fields`, `sections` and `content` are present, then `quotes`

use crate::error::SchemaError;
use persona_model::{JsonPath, LayerKind, PersonaType, ValidationStatus};
use serde_json::{Map, Value};

type Object = Map<String, Value>;

/// Name of a value's JSON type, with numbers shown literally
fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// Present, non-null value of a key
fn optional<'a>(object: &'a Object, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn required<'a>(object: &'a Object, key: &str, path: &JsonPath) -> Result<&'a Value, SchemaError> {
    optional(object, key).ok_or_else(|| SchemaError::missing(path.key(key)))
}

fn as_object<'a>(value: &'a Value, path: &JsonPath) -> Result<&'a Object, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::wrong_type(path.clone(), "object", describe(value)))
}

fn as_array<'a>(value: &'a Value, path: &JsonPath) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::wrong_type(path.clone(), "array", describe(value)))
}

fn as_str<'a>(value: &'a Value, path: &JsonPath) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .ok_or_else(|| SchemaError::wrong_type(path.clone(), "string", describe(value)))
}

fn string_key<'a>(object: &'a Object, key: &str, path: &JsonPath) -> Result<&'a str, SchemaError> {
    as_str(required(object, key, path)?, &path.key(key))
}

fn string_array(value: &Value, path: &JsonPath) -> Result<(), SchemaError> {
    for (i, item) in as_array(value, path)?.iter().enumerate() {
        as_str(item, &path.index(i))?;
    }
    Ok(())
}

fn number<'a>(
    object: &'a Object,
    key: &str,
    path: &JsonPath,
) -> Result<&'a serde_json::Number, SchemaError> {
    let value = required(object, key, path)?;
    value
        .as_number()
        .ok_or_else(|| SchemaError::wrong_type(path.key(key), "number", describe(value)))
}

fn member<T: std::str::FromStr>(
    value: &str,
    path: JsonPath,
    valid_names: impl FnOnce() -> String,
) -> Result<T, SchemaError> {
    value
        .parse()
        .map_err(|_| SchemaError::not_in_set(path, value, valid_names()))
}

fn optional_status(object: &Object, path: &JsonPath) -> Result<(), SchemaError> {
    if let Some(value) = optional(object, "validation") {
        let path = path.key("validation");
        let status = as_str(value, &path)?;
        member::<ValidationStatus>(status, path, ValidationStatus::valid_names)?;
    }
    Ok(())
}

/// Structural validator for persona documents
///
/// Every accepted value decodes into a [`Document`](persona_model::Document).
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Create new validator instance
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a parsed JSON value
    ///
    /// # Returns
    /// - `Ok(())` if the value has the document shape
    /// - `Err(SchemaError)` for the first violation, with its path
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let result = self.validate_document(value);
        if let Err(e) = &result {
            tracing::debug!(path = %e.path(), message = %e.kind(), "document rejected");
        }
        result
    }

    fn validate_document(&self, value: &Value) -> Result<(), SchemaError> {
        let root = JsonPath::root();
        let document = as_object(value, &root)?;

        let personas_path = root.key("personas");
        let personas = as_object(required(document, "personas", &root)?, &personas_path)?;

        let content_path = root.key("layerContent");
        let layer_content = as_object(required(document, "layerContent", &root)?, &content_path)?;

        if let Some(metadata) = document.get("metadata") {
            as_object(metadata, &root.key("metadata"))?;
        }

        for (id, persona) in personas {
            self.validate_persona(persona, &personas_path.key(id.as_str()))?;
        }

        for (id, content) in layer_content {
            self.validate_layer_content(content, &content_path.key(id.as_str()))?;
        }

        Ok(())
    }

    fn validate_persona(&self, value: &Value, path: &JsonPath) -> Result<(), SchemaError> {
        let persona = as_object(value, path)?;

        let persona_type = string_key(persona, "type", path)?;
        string_key(persona, "title", path)?;
        string_key(persona, "subtitle", path)?;
        let status = string_key(persona, "validationStatus", path)?;
        string_key(persona, "evidenceSummary", path)?;

        member::<PersonaType>(persona_type, path.key("type"), PersonaType::valid_names)?;
        member::<ValidationStatus>(
            status,
            path.key("validationStatus"),
            ValidationStatus::valid_names,
        )?;

        let count = number(persona, "interviewCount", path)?;
        if count.as_u64().and_then(|n| u32::try_from(n).ok()).is_none() {
            return Err(SchemaError::wrong_type(
                path.key("interviewCount"),
                "non-negative integer",
                count.to_string(),
            ));
        }

        let score = number(persona, "qualityScore", path)?;
        if score.as_i64().and_then(|n| i32::try_from(n).ok()).is_none() {
            return Err(SchemaError::wrong_type(
                path.key("qualityScore"),
                "integer",
                score.to_string(),
            ));
        }

        let layers_path = path.key("layers");
        let layers = as_array(required(persona, "layers", path)?, &layers_path)?;
        for (i, layer) in layers.iter().enumerate() {
            let layer_path = layers_path.index(i);
            let layer = as_object(layer, &layer_path)?;
            for key in ["id", "number", "title", "subtitle"] {
                string_key(layer, key, &layer_path)?;
            }
        }

        Ok(())
    }

    fn validate_layer_content(&self, value: &Value, path: &JsonPath) -> Result<(), SchemaError> {
        let content = as_object(value, path)?;

        if let Some(kind) = optional(content, "kind") {
            let kind_path = path.key("kind");
            let kind = as_str(kind, &kind_path)?;
            let kind = member::<LayerKind>(kind, kind_path, LayerKind::valid_names)?;
            required(content, kind.required_key(), path)?;
        }

        if let Some(fields) = optional(content, "fields") {
            let fields_path = path.key("fields");
            for (i, field) in as_array(fields, &fields_path)?.iter().enumerate() {
                let field_path = fields_path.index(i);
                let field = as_object(field, &field_path)?;
                for key in ["label", "content", "source"] {
                    string_key(field, key, &field_path)?;
                }
                optional_status(field, &field_path)?;
            }
        }

        if let Some(sections) = optional(content, "sections") {
            let sections_path = path.key("sections");
            for (i, section) in as_array(sections, &sections_path)?.iter().enumerate() {
                let section_path = sections_path.index(i);
                let section = as_object(section, &section_path)?;
                string_key(section, "label", &section_path)?;
                string_array(
                    required(section, "items", &section_path)?,
                    &section_path.key("items"),
                )?;
                optional_status(section, &section_path)?;
            }
        }

        if let Some(narrative) = optional(content, "content") {
            as_str(narrative, &path.key("content"))?;
            required(content, "source", path)?;
        }
        if let Some(source) = optional(content, "source") {
            as_str(source, &path.key("source"))?;
        }
        if let Some(gaps) = optional(content, "gaps") {
            string_array(gaps, &path.key("gaps"))?;
        }

        if let Some(quotes) = optional(content, "quotes") {
            let quotes_path = path.key("quotes");
            for (i, quote) in as_array(quotes, &quotes_path)?.iter().enumerate() {
                let quote_path = quotes_path.index(i);
                let quote = as_object(quote, &quote_path)?;
                for key in ["text", "author", "source"] {
                    string_key(quote, key, &quote_path)?;
                }
            }
        }

        Ok(())
    }
}

/// Validate a parsed JSON value with the default validator
///
/// # Errors
/// Returns the first [`SchemaError`] found.
pub fn validate_document(value: &Value) -> Result<(), SchemaError> {
    SchemaValidator::new().validate(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn persona() -> Value {
        json!({
            "type": "partner",
            "title": "Maria",
            "subtitle": "",
            "validationStatus": "validated",
            "evidenceSummary": "8 interviews",
            "interviewCount": 8,
            "qualityScore": 4,
            "layers": [
                {"id": "m-layer1", "number": "1", "title": "Requester", "subtitle": ""}
            ]
        })
    }

    fn document_with(persona: Value, content: Value) -> Value {
        json!({
            "personas": {"m": persona},
            "layerContent": {"m-layer1": content}
        })
    }

    fn error_path(value: &Value) -> String {
        validate_document(value).unwrap_err().path().to_string()
    }

    #[test]
    fn minimal_document_is_valid() {
        let doc = document_with(persona(), json!({"kind": "fields", "fields": []}));
        assert!(validate_document(&doc).is_ok());
        assert!(validate_document(&json!({"personas": {}, "layerContent": {}})).is_ok());
    }

    #[test]
    fn root_must_be_object() {
        let err = validate_document(&json!([])).unwrap_err();
        assert_eq!(err.to_string(), "<root>: expected object, found array");
    }

    #[test]
    fn top_level_keys_checked_first() {
        assert_eq!(error_path(&json!({"layerContent": {}})), "personas");
        assert_eq!(error_path(&json!({"personas": {}, "layerContent": []})), "layerContent");
        assert_eq!(
            error_path(&json!({"personas": {}, "layerContent": {}, "metadata": "x"})),
            "metadata"
        );
    }

    #[test]
    fn unknown_type_lists_valid_set() {
        let mut p = persona();
        p["type"] = json!("unknown-type");
        let err = validate_document(&document_with(p, json!({}))).unwrap_err();

        assert_eq!(err.path().to_string(), "personas.m.type");
        assert_eq!(
            err.message(),
            "invalid value 'unknown-type', expected one of: partner, innovator, stakeholder, beneficiary"
        );
    }

    #[test]
    fn string_checks_precede_membership_checks() {
        let mut p = persona();
        p["type"] = json!("nobody");
        p["evidenceSummary"] = json!(3);
        assert_eq!(error_path(&document_with(p, json!({}))), "personas.m.evidenceSummary");
    }

    #[test]
    fn numeric_fields() {
        let mut p = persona();
        p["interviewCount"] = json!("8");
        let err = validate_document(&document_with(p, json!({}))).unwrap_err();
        assert_eq!(err.message(), "expected number, found string");

        let mut p = persona();
        p["interviewCount"] = json!(-1);
        assert_eq!(error_path(&document_with(p, json!({}))), "personas.m.interviewCount");

        let mut p = persona();
        p["qualityScore"] = json!(3.5);
        let err = validate_document(&document_with(p, json!({}))).unwrap_err();
        assert_eq!(err.to_string(), "personas.m.qualityScore: expected integer, found 3.5");
    }

    #[test]
    fn layer_meta_strings() {
        let mut p = persona();
        p["layers"][0]["number"] = json!(1);
        assert_eq!(error_path(&document_with(p, json!({}))), "personas.m.layers[0].number");
    }

    #[test]
    fn section_label_path() {
        let content = json!({
            "sections": [
                {"label": "Activities", "items": []},
                {"label": "Challenges", "items": ["a"]},
                {"items": []}
            ]
        });
        let doc = json!({"personas": {}, "layerContent": {"layer3": content}});
        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err.path().to_string(), "layerContent.layer3.sections[2].label");
        assert_eq!(err.message(), "missing required key");
    }

    #[test]
    fn section_items_must_be_strings() {
        let content = json!({"sections": [{"label": "Needs", "items": ["ok", 2]}]});
        let doc = json!({"personas": {}, "layerContent": {"l": content}});
        assert_eq!(error_path(&doc), "layerContent.l.sections[0].items[1]");
    }

    #[test]
    fn field_validation_membership() {
        let content = json!({
            "fields": [{"label": "Age", "content": "42", "source": "s", "validation": "maybe"}]
        });
        let err = validate_document(&document_with(persona(), content)).unwrap_err();
        assert_eq!(err.path().to_string(), "layerContent.m-layer1.fields[0].validation");
        assert!(err.message().contains("validated, inferred, hybrid"));
    }

    #[test]
    fn solution_requires_source() {
        let content = json!({"content": "Paper ledgers", "gaps": ["x"]});
        assert_eq!(
            error_path(&document_with(persona(), content)),
            "layerContent.m-layer1.source"
        );

        let content = json!({"content": "Paper ledgers", "source": "s", "gaps": [1]});
        assert_eq!(
            error_path(&document_with(persona(), content)),
            "layerContent.m-layer1.gaps[0]"
        );
    }

    #[test]
    fn quotes_checked_on_any_variant() {
        let content = json!({
            "content": "c",
            "source": "s",
            "quotes": [{"text": "t", "author": "a"}]
        });
        assert_eq!(
            error_path(&document_with(persona(), content)),
            "layerContent.m-layer1.quotes[0].source"
        );
    }

    #[test]
    fn tagged_kind_requires_its_key() {
        let value = document_with(persona(), json!({"kind": "sections"}));
        let err = validate_document(&value).unwrap_err();
        assert_eq!(err.path().to_string(), "layerContent.m-layer1.sections");

        let value = document_with(persona(), json!({"kind": "table"}));
        let err = validate_document(&value).unwrap_err();
        assert_eq!(err.path().to_string(), "layerContent.m-layer1.kind");
        assert!(err.message().contains("fields, sections, solution"));
    }

    #[test]
    fn multi_shaped_content_is_accepted() {
        let content = json!({
            "fields": [],
            "sections": [],
            "content": "c",
            "source": "s"
        });
        assert!(validate_document(&document_with(persona(), content)).is_ok());
    }

    #[test]
    fn personas_visited_in_key_order() {
        let mut bad = persona();
        bad["title"] = json!(null);
        let doc = json!({
            "personas": {"z": persona(), "b": bad.clone(), "a": bad},
            "layerContent": {}
        });
        assert_eq!(error_path(&doc), "personas.b.title");
    }
}
