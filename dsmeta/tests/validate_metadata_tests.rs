//! Integration tests for `dsmeta::MetadataValidator`.

use std::collections::BTreeSet;
use std::fs;
use std::thread;

use dsmeta::{
    DatasetMetadata, Field, LanguageSource, LanguageTagChecker, MetadataError, MetadataValidator,
    ReferenceVocabularies, ValidationConfig,
};
use dsmeta::vocab::Vocabulary;
use serde_json::{Map, Value, json};
use tempfile::TempDir;

const VALID_CARD: &str = "\
---
annotations_creators:
- found
language_creators:
- found
languages:
- en
licenses:
- mit
multilinguality:
- monolingual
size_categories:
- 10K<n<100K
source_datasets:
- original
task_categories:
- text-classification
task_ids:
- text-classification-other-my-task
---

# Dataset Card for Demo
";

fn vocabularies() -> ReferenceVocabularies {
    ReferenceVocabularies::bundled().unwrap()
}

fn mapping(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn valid_mapping() -> Map<String, Value> {
    mapping(json!({
        "annotations_creators": ["found", "no-annotation"],
        "language_creators": ["found"],
        "languages": ["en", "fr"],
        "licenses": ["mit", "apache-2.0"],
        "multilinguality": ["multilingual"],
        "size_categories": ["1K<n<10K"],
        "source_datasets": ["original", "extended|squad"],
        "task_categories": ["question-answering", "text-classification"],
        "task_ids": ["extractive-qa", "sentiment-classification"],
    }))
}

fn as_set(values: &[String]) -> BTreeSet<&str> {
    values.iter().map(String::as_str).collect()
}

fn expect_tags(result: Result<DatasetMetadata, MetadataError>) -> dsmeta::ValidationReport {
    match result {
        Err(MetadataError::Tags(report)) => report,
        Err(other) => panic!("expected tag errors, got: {other}"),
        Ok(metadata) => panic!("expected tag errors, got valid metadata: {metadata:?}"),
    }
}

#[test]
fn test_valid_mapping_preserves_values_as_sets() {
    let vocab = vocabularies();
    let input = valid_mapping();
    let metadata = MetadataValidator::new(&vocab).validate(&input).unwrap();

    for field in Field::ALL {
        if field == Field::Languages {
            continue;
        }
        let expected: BTreeSet<&str> = input[field.as_str()]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(as_set(metadata.get(field)), expected, "field {field}");
    }
}

#[test]
fn test_languages_default_to_language_creators() {
    let vocab = vocabularies();
    let metadata = MetadataValidator::new(&vocab)
        .validate(&valid_mapping())
        .unwrap();

    assert_eq!(metadata.languages(), ["found"]);
    assert_eq!(metadata.language_creators(), ["found"]);
}

#[test]
fn test_every_language_creator_role_passes_by_default() {
    let vocab = vocabularies();
    let validator = MetadataValidator::new(&vocab);

    for role in vocab.tagset(Vocabulary::LanguageCreators).iter() {
        let mut input = valid_mapping();
        input.insert("language_creators".to_owned(), json!([role]));
        let metadata = validator
            .validate(&input)
            .unwrap_or_else(|err| panic!("{role} should pass: {err}"));
        assert_eq!(metadata.language_creators(), [role]);
        assert_eq!(metadata.languages(), [role]);
    }
}

#[test]
fn test_every_vocabulary_entry_validates_and_is_preserved() {
    let vocab = vocabularies();
    let validator = MetadataValidator::new(&vocab);
    let fields = [
        (Field::AnnotationsCreators, Vocabulary::AnnotationCreators),
        (Field::LanguageCreators, Vocabulary::LanguageCreators),
        (Field::Licenses, Vocabulary::Licenses),
        (Field::Multilinguality, Vocabulary::Multilingualities),
        (Field::SizeCategories, Vocabulary::SizeCategories),
        (Field::TaskCategories, Vocabulary::TaskCategories),
        (Field::TaskIds, Vocabulary::TaskIds),
    ];

    for (field, vocabulary) in fields {
        let tagset = validator.vocabularies().tagset(vocabulary);
        assert!(!tagset.is_empty(), "{field}");
        for entry in tagset.iter() {
            let mut input = valid_mapping();
            input.insert(field.as_str().to_owned(), json!([entry, entry]));
            let metadata = validator
                .validate(&input)
                .unwrap_or_else(|err| panic!("{field} entry {entry} should pass: {err}"));
            assert_eq!(
                as_set(metadata.get(field)),
                BTreeSet::from([entry]),
                "{field} entry {entry}"
            );
        }
    }
}

#[test]
fn test_languages_source_can_be_the_languages_list() {
    let vocab = vocabularies();
    let config = ValidationConfig::default().with_language_source(LanguageSource::Languages);
    let validator = MetadataValidator::new(&vocab).with_config(&config);

    let metadata = validator.validate(&valid_mapping()).unwrap();
    assert_eq!(metadata.languages(), ["en", "fr"]);

    let mut input = valid_mapping();
    input.insert("languages".to_owned(), json!(["en", "english_US"]));
    let report = expect_tags(validator.validate(&input));
    let error = report.get(Field::Languages).unwrap();
    assert_eq!(error.rejected, vec!["english_US".to_owned()]);
    assert!(error.message.contains(dsmeta::BCP47_REFERENCE_URL));
}

#[test]
fn test_value_outside_vocabulary_is_reported_under_its_field() {
    let vocab = vocabularies();
    let cases = [
        ("annotations_creators", Field::AnnotationsCreators, "robots"),
        ("language_creators", Field::LanguageCreators, "machine"),
        ("size_categories", Field::SizeCategories, "huge"),
        ("multilinguality", Field::Multilinguality, "bilingual"),
        ("task_categories", Field::TaskCategories, "audio"),
        ("task_ids", Field::TaskIds, "no-such-task"),
        ("source_datasets", Field::SourceDatasets, "derived"),
    ];

    for (key, field, bad) in cases {
        let mut input = valid_mapping();
        input.insert(key.to_owned(), json!([bad]));
        let report = expect_tags(MetadataValidator::new(&vocab).validate(&input));
        assert_eq!(report.fields().collect::<Vec<_>>(), vec![field], "{key}");
        assert_eq!(report.get(field).unwrap().rejected, vec![bad.to_owned()]);
    }
}

#[test]
fn test_two_failing_fields_produce_exactly_two_entries() {
    let vocab = vocabularies();
    let mut input = valid_mapping();
    input.insert("licenses".to_owned(), json!(["not-a-real-license"]));
    input.insert("size_categories".to_owned(), json!(["huge", "1K<n<10K", "tiny"]));

    let report = expect_tags(MetadataValidator::new(&vocab).validate(&input));
    assert_eq!(report.len(), 2);
    let rejected: Vec<&str> = report
        .iter()
        .flat_map(|error| error.rejected.iter().map(String::as_str))
        .collect();
    assert_eq!(rejected, vec!["not-a-real-license", "huge", "tiny"]);
    assert_eq!(
        report.get(Field::SizeCategories).unwrap().rejected,
        vec!["huge".to_owned(), "tiny".to_owned()]
    );
}

#[test]
fn test_license_escape_hatch_is_always_accepted() {
    let vocab = vocabularies();
    let mut input = valid_mapping();
    input.insert(
        "licenses".to_owned(),
        json!(["my-other-license", "mit", "cc-other-by-x"]),
    );

    let metadata = MetadataValidator::new(&vocab).validate(&input).unwrap();
    assert_eq!(
        metadata.licenses(),
        ["mit", "my-other-license", "cc-other-by-x"]
    );
}

#[test]
fn test_multilinguality_escape_hatch() {
    let vocab = vocabularies();
    let mut input = valid_mapping();
    input.insert(
        "multilinguality".to_owned(),
        json!(["other-code-switching", "monolingual"]),
    );

    let metadata = MetadataValidator::new(&vocab).validate(&input).unwrap();
    assert_eq!(
        metadata.multilinguality(),
        ["monolingual", "other-code-switching"]
    );
}

#[test]
fn test_task_ids_independent_of_declared_category() {
    let vocab = vocabularies();
    let mut input = valid_mapping();
    input.insert("task_categories".to_owned(), json!(["text-classification"]));
    input.insert(
        "task_ids".to_owned(),
        json!(["extractive-qa", "named-entity-recognition", "qa-other-custom"]),
    );

    let metadata = MetadataValidator::new(&vocab).validate(&input).unwrap();
    assert_eq!(metadata.task_ids().len(), 3);
}

#[test]
fn test_source_datasets_rules() {
    let vocab = vocabularies();
    let validator = MetadataValidator::new(&vocab);

    for accepted in [json!(["original"]), json!(["extended"]), json!(["extended|glue"])] {
        let mut input = valid_mapping();
        input.insert("source_datasets".to_owned(), accepted.clone());
        assert!(validator.validate(&input).is_ok(), "{accepted} should pass");
    }

    let mut input = valid_mapping();
    input.insert("source_datasets".to_owned(), json!(["derived", "original"]));
    let report = expect_tags(validator.validate(&input));
    assert_eq!(
        report.get(Field::SourceDatasets).unwrap().rejected,
        vec!["derived".to_owned()]
    );
}

#[test]
fn test_mock_language_checker() {
    struct RejectAll;
    impl LanguageTagChecker for RejectAll {
        fn is_valid_language_tag(&self, _code: &str) -> bool {
            false
        }
    }

    let vocab = vocabularies();
    let checker = RejectAll;
    let config = ValidationConfig::default().with_language_source(LanguageSource::Languages);
    let validator = MetadataValidator::new(&vocab)
        .with_language_checker(&checker)
        .with_config(&config);
    let report = expect_tags(validator.validate(&valid_mapping()));
    assert_eq!(report.fields().collect::<Vec<_>>(), vec![Field::Languages]);

    // The default source only logs language tag failures.
    let metadata = MetadataValidator::new(&vocab)
        .with_language_checker(&checker)
        .validate(&valid_mapping())
        .unwrap();
    assert_eq!(metadata.languages(), ["found"]);
}

#[test]
fn test_end_to_end_valid_card() {
    let tmp = TempDir::new().unwrap();
    let readme = tmp.path().join("README.md");
    fs::write(&readme, VALID_CARD).unwrap();

    let vocab = vocabularies();
    let metadata = MetadataValidator::new(&vocab)
        .validate_file(&readme)
        .unwrap();

    assert_eq!(metadata.licenses(), ["mit"]);
    assert_eq!(metadata.size_categories(), ["10K<n<100K"]);
    assert_eq!(metadata.task_ids(), ["text-classification-other-my-task"]);
}

#[test]
fn test_end_to_end_unknown_license() {
    let vocab = vocabularies();
    let card = VALID_CARD.replace("- mit", "- not-a-real-license");

    let report = expect_tags(MetadataValidator::new(&vocab).validate_document(&card, "README.md"));
    assert_eq!(report.fields().collect::<Vec<_>>(), vec![Field::Licenses]);
    assert_eq!(
        report.get(Field::Licenses).unwrap().rejected,
        vec!["not-a-real-license".to_owned()]
    );
    assert!(report.to_string().contains("[\"not-a-real-license\"]"));
}

#[test]
fn test_document_without_block_is_not_a_validation_error() {
    let vocab = vocabularies();
    let err = MetadataValidator::new(&vocab)
        .validate_document("# Dataset Card\n\nNo metadata here.\n", "card.md")
        .unwrap_err();

    assert!(
        matches!(err, MetadataError::NoMetadataBlock { ref origin } if origin == "card.md"),
        "got: {err}"
    );
}

#[test]
fn test_empty_block_reports_every_field_missing() {
    let vocab = vocabularies();
    let err = MetadataValidator::new(&vocab)
        .validate_document("---\n---\n", "card.md")
        .unwrap_err();

    let report = err.structural_report().unwrap();
    assert_eq!(report.fields().count(), 9);
}

#[test]
fn test_validate_yaml_str_flow_sequences() {
    let vocab = vocabularies();
    let yaml = "\
annotations_creators: [expert-generated]
language_creators: [found]
languages: [de]
licenses: [cc-by-4.0]
multilinguality: [monolingual]
size_categories: [n<1K]
source_datasets: [original]
task_categories: [structure-prediction]
task_ids: [named-entity-recognition]
";
    let metadata = MetadataValidator::new(&vocab).validate_yaml_str(yaml).unwrap();
    assert_eq!(metadata.annotations_creators(), ["expert-generated"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let vocab = vocabularies();
    let err = MetadataValidator::new(&vocab)
        .validate_file(&tmp.path().join("missing.md"))
        .unwrap_err();
    assert!(matches!(err, MetadataError::Io { .. }), "got: {err}");
}

#[test]
fn test_shared_validator_across_threads() {
    let vocab = vocabularies();
    let validator = MetadataValidator::new(&vocab);

    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let mut input = valid_mapping();
                    if i % 2 == 1 {
                        input.insert("licenses".to_owned(), json!(["bogus"]));
                    }
                    validator.validate(&input).is_ok()
                })
            })
            .collect();
        let outcomes: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(outcomes, vec![true, false, true, false]);
    });
}
