use persona_core::prelude::*;
use persona_core::{ExtractionWarning, ImportError};
use persona_test_utils::{init_test_tracing, sample_document, MARIA_MARKDOWN};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn maria_and_ade() -> Vec<PersonaSource> {
    vec![
        PersonaSource::new("partner-maria", MARIA_MARKDOWN),
        PersonaSource::new(
            "beneficiary-ade",
            "## Persona: Ade\n**Type:** Beneficiary\n**Validation Status:** Not validated\n",
        ),
    ]
}

#[test]
fn test_batch_export_import_roundtrip() {
    init_test_tracing();
    let pipeline =
        PersonaPipeline::new(PipelineConfig::new().with_project_name("Andes Pilot")).unwrap();

    let batch = pipeline.extract_all(&maria_and_ade()).unwrap();
    let json = pipeline.export(&batch.document).unwrap();
    let document = pipeline.import(&json).unwrap();

    assert_eq!(document, batch.document);
    assert_eq!(document.len(), 2);
    assert!(document.dangling_layers().is_empty());
    assert_eq!(
        document.metadata.as_ref().and_then(|m| m.project_name.as_deref()),
        Some("Andes Pilot")
    );
}

#[test]
fn test_batch_matches_single_extraction() {
    let pipeline = PersonaPipeline::default();
    let batch = pipeline.extract_all(&maria_and_ade()).unwrap();
    let single = pipeline.extract(MARIA_MARKDOWN, "partner-maria");

    assert_eq!(
        batch.document.persona("partner-maria"),
        single.document.persona("partner-maria")
    );
    assert_eq!(batch.warnings_for("partner-maria"), single.warnings.as_slice());
}

#[test]
fn test_batch_warnings_per_persona() {
    let batch = PersonaPipeline::default().extract_all(&maria_and_ade()).unwrap();
    let ade = batch.warnings_for("beneficiary-ade");

    assert!(ade.contains(&ExtractionWarning::QualityScoreDefaulted));
    assert!(ade.contains(&ExtractionWarning::SectionMissing { layer: 1 }));
    assert!(!ade.contains(&ExtractionWarning::StatusDefaulted));
    assert_eq!(
        batch.document.persona("beneficiary-ade").unwrap().validation_status,
        ValidationStatus::Inferred
    );
}

#[test]
fn test_import_error_exposes_path() {
    let pipeline = PersonaPipeline::default();
    let mut value = serde_json::to_value(sample_document()).unwrap();
    value["layerContent"]["partner-maria-layer3"]["sections"][1]["label"] = serde_json::json!(7);

    let err = pipeline.import(&value.to_string()).unwrap_err();
    assert_eq!(
        err.schema_path().as_deref(),
        Some("layerContent.partner-maria-layer3.sections[1].label")
    );

    let err = pipeline.validate(&value).unwrap_err();
    assert!(matches!(err, PersonaError::Schema(_)));
}

#[test]
fn test_syntax_error_passes_through() {
    let err = PersonaPipeline::default().import("{").unwrap_err();
    assert!(matches!(err, PersonaError::Import(ImportError::Syntax(_))));
    assert_eq!(err.schema_path(), None);
}

#[test]
fn test_toml_configured_pipeline() {
    let config = PipelineConfig::from_toml_str(
        r#"
        version = "3"

        [extractor]
        default_evidence_source = "Workshop notes"
        "#,
    )
    .unwrap();
    let pipeline = PersonaPipeline::new(config).unwrap();

    let extraction = pipeline.extract("### Layer 1: Requester\n**Role:** Nurse\n", "n");
    let layer = &extraction.document.layer_content["n-layer1"];
    assert_eq!(layer.field("Role").unwrap().source, "Workshop notes");
    assert_eq!(pipeline.config().version.as_deref(), Some("3"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_batch_document_always_imports(
        texts in prop::collection::vec(any::<String>(), 0..5)
    ) {
        let sources: Vec<_> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PersonaSource::new(format!("p{i}"), text))
            .collect();
        let pipeline = PersonaPipeline::default();

        let batch = pipeline.extract_all(&sources).unwrap();
        prop_assert_eq!(batch.document.len(), sources.len());
        prop_assert_eq!(batch.document.layer_content.len(), sources.len() * 4);

        let json = pipeline.export(&batch.document).unwrap();
        prop_assert_eq!(pipeline.import(&json).unwrap(), batch.document);
    }
}
