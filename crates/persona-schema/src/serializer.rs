//! JSON export and import
//!
//! Export is pretty-printed with two-space indentation and keeps map
//! insertion order. Import parses, validates, then decodes; a document is
//! either fully valid or rejected.

use crate::error::{ImportError, SerializeError};
use crate::validator::SchemaValidator;
use persona_model::Document;
use serde_json::Value;

/// Encode a document as indented JSON
///
/// # Errors
/// Returns `SerializeError::Json` if encoding fails.
pub fn export_to_json(document: &Document) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Parse, validate and decode a document
///
/// # Errors
/// - `ImportError::Syntax` for malformed JSON, before any validation
/// - `ImportError::Schema` for the first structural violation
/// - `ImportError::Decode` if a validated value still fails to decode
pub fn import_from_json(text: &str) -> Result<Document, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Syntax)?;
    import_from_value(value)
}

/// Validate and decode an already parsed JSON value
///
/// # Errors
/// As [`import_from_json`], minus syntax errors.
pub fn import_from_value(value: Value) -> Result<Document, ImportError> {
    SchemaValidator::new().validate(&value)?;
    let document: Document = serde_json::from_value(value).map_err(ImportError::Decode)?;
    tracing::debug!(
        personas = document.personas.len(),
        layers = document.layer_content.len(),
        "document imported"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_model::{LayerContent, PersonaType};

    #[test]
    fn export_uses_two_space_indent() {
        let json = export_to_json(&Document::new()).unwrap();
        assert_eq!(json, "{\n  \"personas\": {},\n  \"layerContent\": {}\n}");
    }

    #[test]
    fn syntax_error_precedes_validation() {
        let err = import_from_json("{\"personas\": ").unwrap_err();
        assert!(matches!(err, ImportError::Syntax(_)));
        assert!(err.schema_error().is_none());
    }

    #[test]
    fn schema_error_propagates() {
        let err = import_from_json(r#"{"personas": []}"#).unwrap_err();
        let schema = err.schema_error().unwrap();
        assert_eq!(schema.path().to_string(), "personas");
    }

    #[test]
    fn legacy_untagged_content_imports() {
        let json = r#"{
            "personas": {
                "p": {
                    "type": "innovator",
                    "title": "Ana",
                    "subtitle": "",
                    "validationStatus": "hybrid",
                    "evidenceSummary": "",
                    "interviewCount": 2,
                    "qualityScore": 3,
                    "layers": [{
                        "id": "p-layer4",
                        "number": "4",
                        "title": "Current Solutions",
                        "subtitle": ""
                    }]
                }
            },
            "layerContent": {
                "p-layer4": {"content": "Spreadsheets", "source": "Interview data"}
            }
        }"#;

        let doc = import_from_json(json).unwrap();
        assert_eq!(doc.persona("p").unwrap().persona_type, PersonaType::Innovator);
        assert!(matches!(
            doc.layer_content["p-layer4"],
            LayerContent::Solution { .. }
        ));

        let exported = export_to_json(&doc).unwrap();
        assert!(exported.contains("\"kind\": \"solution\""));
    }
}
