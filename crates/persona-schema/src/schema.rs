//! Published JSON Schema of the exported document

use persona_model::Document;
use schemars::schema::RootSchema;
use schemars::schema_for;

/// JSON Schema describing [`export_to_json`](crate::export_to_json) output
#[must_use]
pub fn document_json_schema() -> RootSchema {
    schema_for!(Document)
}
