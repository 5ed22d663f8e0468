//! Testing utilities for the persona workspace
//!
//! Shared fixtures, proptest strategies and tracing setup.

#![allow(missing_docs)]

use indexmap::IndexMap;
use persona_model::{
    layer_id, Document, LayerContent, LayerMeta, Metadata, Persona, PersonaField, PersonaSection,
    PersonaType, Quote, ValidationStatus, LAYER_COUNT,
};
use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;
use serde_json::json;

/// Complete four-layer write-up for the "Maria" partner persona
pub const MARIA_MARKDOWN: &str = r#"# Example: Partner Persona

## Persona: Maria

**Type:** Partner
**Validation Status:** Validated - Strong Quality (Score 4)
**Sources:** 8 interviews with cooperative leaders (2024)
**Geographic Context:** Rural Andes, Peru

---

### Layer 1: Requester (Who they are)

**First Name:** Maria
**Age:** 42
**Role:** Cooperative coordinator
**Organization:** Andean Growers Cooperative
**Thinks / Feels:** Responsible for 120 families and worried
about losing buyers to larger farms.
**Says / Does:** Organises weekly meetings and keeps the ledgers by hand.
**Key Quote:** "I spend my Sundays reconciling paper receipts" - Maria, Interview #2

**Evidence Notes:**
- Interview 2 (Maria, coordinator)
- Interview 5 (cooperative board)

---

### Layer 2: Field of Application (Their world)

**Environment:** Remote highland villages with intermittent connectivity.
**Sees:** Younger members leaving for the city.
**Hears:** Buyers asking for traceability certificates.
**Influences:** Regional agricultural ministry and NGO partners.

**Evidence Notes:**
- Interview 3 (field visit)

---

### Layer 3: Activities & Challenges

**Activities:**
- Collects harvest data from members
- Negotiates prices with buyers
1. Files quarterly reports

**Challenges:**
- Unreliable mobile coverage
* Manual record keeping

**Pain Points:**
- Late payments from buyers

**Key Quote:** "Every delay means a family cannot buy seed" – Maria

---

### Layer 4: Current Solutions

**Current Solutions:** Paper ledgers, a shared spreadsheet updated monthly
by her nephew, and WhatsApp groups for announcements.

**Gaps:**
- No real-time view of stock
- Records lost when notebooks get wet

**Evidence Notes:**
- Interview 2 (Maria, coordinator)
- Site visit photos
"#;

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn quote(text: &str, author: &str, source: &str) -> Quote {
    Quote {
        text: text.to_string(),
        author: author.to_string(),
        source: source.to_string(),
    }
}

fn field(label: &str, content: &str, validation: Option<ValidationStatus>) -> PersonaField {
    PersonaField {
        label: label.to_string(),
        content: content.to_string(),
        source: "Interview data".to_string(),
        validation,
    }
}

fn layer_metas(persona_id: &str, titles: [&str; LAYER_COUNT]) -> Vec<LayerMeta> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| LayerMeta {
            id: layer_id(persona_id, i + 1),
            number: (i + 1).to_string(),
            title: (*title).to_string(),
            subtitle: String::new(),
        })
        .collect()
}

/// Hand-authored document covering every layer variant and optional key
#[must_use]
pub fn sample_document() -> Document {
    let titles = [
        "Requester",
        "Field of Application",
        "Activities and Challenges",
        "Current Solutions",
    ];

    let mut personas = IndexMap::new();
    personas.insert(
        "partner-maria".to_string(),
        Persona {
            persona_type: PersonaType::Partner,
            title: "Maria".to_string(),
            subtitle: "Rural Andes, Peru".to_string(),
            validation_status: ValidationStatus::Validated,
            evidence_summary: "8 interviews with cooperative leaders".to_string(),
            interview_count: 8,
            quality_score: 4,
            layers: layer_metas("partner-maria", titles),
        },
    );
    personas.insert(
        "beneficiary-jo".to_string(),
        Persona {
            persona_type: PersonaType::Beneficiary,
            title: "Jo".to_string(),
            subtitle: String::new(),
            validation_status: ValidationStatus::Hybrid,
            evidence_summary: "Desk research".to_string(),
            interview_count: 0,
            quality_score: 2,
            layers: layer_metas("beneficiary-jo", titles),
        },
    );

    let mut layer_content = IndexMap::new();
    for id in ["partner-maria", "beneficiary-jo"] {
        layer_content.insert(
            layer_id(id, 1),
            LayerContent::Fields {
                fields: vec![
                    field("First Name", "Maria", None),
                    field(
                        "Thinks / Feels",
                        "Worried about buyers",
                        Some(ValidationStatus::Validated),
                    ),
                ],
                quotes: Some(vec![quote(
                    "I spend my Sundays on receipts",
                    "Maria",
                    "Interview #2",
                )]),
            },
        );
        layer_content.insert(
            layer_id(id, 2),
            LayerContent::Fields {
                fields: vec![field(
                    "Environment",
                    "Highland villages",
                    Some(ValidationStatus::Inferred),
                )],
                quotes: None,
            },
        );
        layer_content.insert(
            layer_id(id, 3),
            LayerContent::Sections {
                sections: vec![
                    PersonaSection {
                        label: "Activities".to_string(),
                        items: vec!["Collects harvest data".to_string()],
                        validation: None,
                    },
                    PersonaSection {
                        label: "Challenges".to_string(),
                        items: vec![
                            "Unreliable coverage".to_string(),
                            "Manual records".to_string(),
                        ],
                        validation: Some(ValidationStatus::Hybrid),
                    },
                ],
                quotes: Some(Vec::new()),
            },
        );
        layer_content.insert(
            layer_id(id, 4),
            LayerContent::Solution {
                content: "Paper ledgers and WhatsApp groups".to_string(),
                source: "Interview 2; Site visit photos".to_string(),
                gaps: Some(vec!["No real-time stock view".to_string()]),
                quotes: None,
            },
        );
    }

    let mut metadata = Metadata::new()
        .with_project_name("Andes Pilot")
        .with_created_at("2024-05-01")
        .with_version("1.0");
    metadata.extra.insert("owner".to_string(), json!("research team"));

    Document {
        personas,
        layer_content,
        metadata: Some(metadata),
    }
}

/// Printable text without control characters
pub fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,.;:'\"/&()-]{0,24}"
}

pub fn arb_persona_type() -> impl Strategy<Value = PersonaType> {
    prop::sample::select(PersonaType::ALL.to_vec())
}

pub fn arb_validation_status() -> impl Strategy<Value = ValidationStatus> {
    prop::sample::select(ValidationStatus::ALL.to_vec())
}

pub fn arb_quote() -> impl Strategy<Value = Quote> {
    (arb_text(), arb_text(), arb_text()).prop_map(|(text, author, source)| Quote {
        text,
        author,
        source,
    })
}

fn arb_quotes() -> impl Strategy<Value = Option<Vec<Quote>>> {
    option::of(vec(arb_quote(), 0..3))
}

pub fn arb_field() -> impl Strategy<Value = PersonaField> {
    (arb_text(), arb_text(), arb_text(), option::of(arb_validation_status())).prop_map(
        |(label, content, source, validation)| PersonaField {
            label,
            content,
            source,
            validation,
        },
    )
}

pub fn arb_section() -> impl Strategy<Value = PersonaSection> {
    (arb_text(), vec(arb_text(), 0..4), option::of(arb_validation_status())).prop_map(
        |(label, items, validation)| PersonaSection {
            label,
            items,
            validation,
        },
    )
}

pub fn arb_layer_content() -> impl Strategy<Value = LayerContent> {
    prop_oneof![
        (vec(arb_field(), 0..4), arb_quotes())
            .prop_map(|(fields, quotes)| LayerContent::Fields { fields, quotes }),
        (vec(arb_section(), 0..4), arb_quotes())
            .prop_map(|(sections, quotes)| LayerContent::Sections { sections, quotes }),
        (arb_text(), arb_text(), option::of(vec(arb_text(), 0..3)), arb_quotes()).prop_map(
            |(content, source, gaps, quotes)| LayerContent::Solution {
                content,
                source,
                gaps,
                quotes,
            }
        ),
    ]
}

pub fn arb_metadata() -> impl Strategy<Value = Metadata> {
    (
        option::of(arb_text()),
        option::of(arb_text()),
        option::of(arb_text()),
    )
        .prop_map(|(project_name, created_at, version)| Metadata {
            project_name,
            created_at,
            version,
            extra: IndexMap::new(),
        })
}

prop_compose! {
    /// A persona without layer references, plus content for its four layers
    fn arb_persona_parts()(
        persona_type in arb_persona_type(),
        validation_status in arb_validation_status(),
        title in arb_text(),
        subtitle in arb_text(),
        evidence_summary in arb_text(),
        interview_count in any::<u32>(),
        quality_score in any::<i32>(),
        contents in vec(arb_layer_content(), LAYER_COUNT),
    ) -> (Persona, Vec<LayerContent>) {
        let persona = Persona {
            persona_type,
            title,
            subtitle,
            validation_status,
            evidence_summary,
            interview_count,
            quality_score,
            layers: Vec::new(),
        };
        (persona, contents)
    }
}

/// Schema-conforming documents with up to three complete personas
pub fn arb_document() -> impl Strategy<Value = Document> {
    (vec(arb_persona_parts(), 0..4), option::of(arb_metadata())).prop_map(|(parts, metadata)| {
        let mut doc = Document::new();
        for (i, (mut persona, contents)) in parts.into_iter().enumerate() {
            let id = format!("persona-{i}");
            for (n, content) in contents.into_iter().enumerate() {
                let layer = LayerMeta {
                    id: layer_id(&id, n + 1),
                    number: (n + 1).to_string(),
                    title: format!("Layer {}", n + 1),
                    subtitle: String::new(),
                };
                doc.layer_content.insert(layer.id.clone(), content);
                persona.layers.push(layer);
            }
            doc.personas.insert(id, persona);
        }
        doc.metadata = metadata;
        doc
    })
}
