use persona_extract::{
    transform_markdown_to_data, ExtractionWarning, ExtractorConfig, PersonaExtractor,
};
use persona_model::{LayerContent, PersonaType, ValidationStatus};
use persona_test_utils::{init_test_tracing, MARIA_MARKDOWN};
use pretty_assertions::assert_eq;

#[test]
fn test_maria_header() {
    init_test_tracing();
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");
    let persona = doc.persona("partner-maria").unwrap();

    assert_eq!(persona.title, "Maria");
    assert_eq!(persona.persona_type, PersonaType::Partner);
    assert_eq!(persona.validation_status, ValidationStatus::Validated);
    assert_eq!(persona.quality_score, 4);
    assert_eq!(persona.interview_count, 8);
    assert_eq!(persona.subtitle, "Rural Andes, Peru");
    assert_eq!(
        persona.evidence_summary,
        "8 interviews with cooperative leaders (2024)"
    );
    assert!(persona.is_complete());
}

#[test]
fn test_maria_layer_meta() {
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");
    let persona = doc.persona("partner-maria").unwrap();

    let ids: Vec<_> = persona.layers.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "partner-maria-layer1",
            "partner-maria-layer2",
            "partner-maria-layer3",
            "partner-maria-layer4",
        ]
    );
    let numbers: Vec<_> = persona.layers.iter().map(|l| l.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3", "4"]);
    assert_eq!(persona.layers[1].title, "Field of Application");
    assert!(doc.dangling_layers().is_empty());
}

#[test]
fn test_maria_requester_fields() {
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");
    let layer = &doc.layer_content["partner-maria-layer1"];

    let first_name = layer.field("First Name").unwrap();
    assert_eq!(first_name.content, "Maria");
    assert_eq!(
        first_name.source,
        "Interview 2 (Maria, coordinator); Interview 5 (cooperative board)"
    );
    assert_eq!(
        layer.field("Thinks / Feels").unwrap().content,
        "Responsible for 120 families and worried about losing buyers to larger farms."
    );
    assert_eq!(
        layer.field("Says / Does").unwrap().content,
        "Organises weekly meetings and keeps the ledgers by hand."
    );

    let quotes = layer.quotes();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].text, "I spend my Sundays reconciling paper receipts");
    assert_eq!(quotes[0].author, "Maria");
    assert_eq!(quotes[0].source, "Interview #2");
}

#[test]
fn test_maria_field_of_application() {
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");
    let layer = &doc.layer_content["partner-maria-layer2"];

    let labels: Vec<_> = layer
        .fields()
        .unwrap()
        .iter()
        .map(|f| f.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Environment", "Sees", "Hears", "Influences"]);
    assert_eq!(layer.field("Sees").unwrap().source, "Interview 3 (field visit)");
    assert!(layer.quotes().is_empty());
}

#[test]
fn test_maria_activities_do_not_leak_into_solutions() {
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");
    let layer = &doc.layer_content["partner-maria-layer3"];

    assert_eq!(
        layer.section("Activities").unwrap().items,
        vec![
            "Collects harvest data from members",
            "Negotiates prices with buyers",
            "Files quarterly reports",
        ]
    );
    assert_eq!(
        layer.section("Challenges").unwrap().items,
        vec!["Unreliable mobile coverage", "Manual record keeping"]
    );
    assert_eq!(
        layer.section("Pain Points").unwrap().items,
        vec!["Late payments from buyers"]
    );
    assert!(layer.section("Needs").is_none());

    let quotes = layer.quotes();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].source, "Interview");

    let all_items: Vec<_> = layer
        .sections()
        .unwrap()
        .iter()
        .flat_map(|s| s.items.iter())
        .collect();
    assert!(all_items.iter().all(|item| !item.contains("real-time")));
}

#[test]
fn test_maria_current_solutions() {
    let doc = transform_markdown_to_data(MARIA_MARKDOWN, "partner-maria");

    match &doc.layer_content["partner-maria-layer4"] {
        LayerContent::Solution {
            content,
            source,
            gaps,
            quotes,
        } => {
            assert_eq!(
                content,
                "Paper ledgers, a shared spreadsheet updated monthly by her nephew, and WhatsApp groups for announcements."
            );
            assert_eq!(source, "Interview 2 (Maria, coordinator); Site visit photos");
            assert_eq!(
                gaps.as_deref(),
                Some(
                    &[
                        "No real-time view of stock".to_string(),
                        "Records lost when notebooks get wet".to_string(),
                    ][..]
                )
            );
            assert!(quotes.is_none());
        }
        other => panic!("layer 4 should be a solution layer, got {other:?}"),
    }
}

#[test]
fn test_maria_warnings_name_missing_labels() {
    let extraction = PersonaExtractor::new().extract_with_report(MARIA_MARKDOWN, "maria");

    assert_eq!(
        extraction.warnings,
        vec![
            ExtractionWarning::FieldMissing {
                layer: 2,
                label: "Constraints".to_string(),
            },
            ExtractionWarning::FieldMissing {
                layer: 3,
                label: "Needs".to_string(),
            },
        ]
    );
    assert!(!extraction.is_clean());
}

#[test]
fn test_crlf_input_matches_lf_input() {
    let crlf = MARIA_MARKDOWN.replace('\n', "\r\n");
    assert_eq!(
        transform_markdown_to_data(&crlf, "m"),
        transform_markdown_to_data(MARIA_MARKDOWN, "m")
    );
}

#[test]
fn test_not_validated_is_inferred() {
    let source = "## Persona: Ade\n**Type:** Beneficiary\n**Validation Status:** Not yet validated\n";
    let extraction = PersonaExtractor::new().extract_with_report(source, "ade");
    let persona = extraction.document.persona("ade").unwrap();

    assert_eq!(persona.persona_type, PersonaType::Beneficiary);
    assert_eq!(persona.validation_status, ValidationStatus::Inferred);
    assert!(!extraction
        .warnings
        .contains(&ExtractionWarning::StatusDefaulted));
}

#[test]
fn test_type_keyword_priority_spans_whole_text() {
    let source = "## Persona: Lu\n**Type:** Stakeholder\nWorks as a partner to the ministry.\n";
    let doc = transform_markdown_to_data(source, "lu");
    assert_eq!(doc.persona("lu").unwrap().persona_type, PersonaType::Partner);
}

#[test]
fn test_partial_status_with_negation_is_hybrid() {
    let source = "## Persona: Ines\n**Validation Status:** Partial - not validated by interviews\n";
    let doc = transform_markdown_to_data(source, "ines");
    assert_eq!(
        doc.persona("ines").unwrap().validation_status,
        ValidationStatus::Hybrid
    );
}

#[test]
fn test_example_heading_title() {
    let doc = transform_markdown_to_data("# Example: Rural Nurse\nStakeholder profile.\n", "n");
    let persona = doc.persona("n").unwrap();

    assert_eq!(persona.title, "Rural Nurse");
    assert_eq!(persona.persona_type, PersonaType::Stakeholder);
}

#[test]
fn test_missing_sections_leave_empty_layers() {
    let extraction = PersonaExtractor::new().extract_with_report("## Persona: Solo\n", "solo");
    let doc = &extraction.document;

    assert_eq!(doc.layer_content.len(), 4);
    assert!(doc.layer_content.values().all(LayerContent::is_empty));
    for layer in 1..=4 {
        assert!(extraction
            .warnings
            .contains(&ExtractionWarning::SectionMissing { layer }));
    }
}

#[test]
fn test_strict_mode_extracts_identically() {
    init_test_tracing();
    let strict = PersonaExtractor::with_config(ExtractorConfig::new().with_strict(true)).unwrap();
    assert_eq!(
        strict.extract_with_report(MARIA_MARKDOWN, "m"),
        PersonaExtractor::new().extract_with_report(MARIA_MARKDOWN, "m")
    );
}
