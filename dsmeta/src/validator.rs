//! The metadata validation engine.
//!
//! Validation runs in two stages. The structural precheck checks that all nine
//! fields are present as non-empty lists of strings. Then every field rule runs,
//! even after another field has failed, so a single report covers every problem.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::{LanguageSource, ValidationConfig};
use crate::error::MetadataError;
use crate::field::Field;
use crate::frontmatter::{extract_front_matter_block, parse_metadata_block};
use crate::langtag::{Bcp47, LanguageTagChecker};
use crate::metadata::DatasetMetadata;
use crate::report::{StructuralProblem, StructuralReport, ValidationReport, quoted_list};
use crate::rules::FIELD_RULES;
use crate::vocab::ReferenceVocabularies;

static DEFAULT_LANGUAGE_TAGS: Bcp47 = Bcp47;

/// Validates field mappings against a set of reference vocabularies.
///
/// Holds only shared, read-only state, so one validator can serve many threads.
#[derive(Clone, Copy)]
pub struct MetadataValidator<'v> {
    vocabularies: &'v ReferenceVocabularies,
    language_tags: &'v dyn LanguageTagChecker,
    language_source: LanguageSource,
}

impl<'v> MetadataValidator<'v> {
    /// A validator with the default BCP 47 checker and config.
    #[must_use]
    pub fn new(vocabularies: &'v ReferenceVocabularies) -> Self {
        Self {
            vocabularies,
            language_tags: &DEFAULT_LANGUAGE_TAGS,
            language_source: LanguageSource::default(),
        }
    }

    /// Replace the language tag checker.
    #[must_use]
    pub fn with_language_checker(mut self, checker: &'v dyn LanguageTagChecker) -> Self {
        self.language_tags = checker;
        self
    }

    /// Apply `config`.
    #[must_use]
    pub fn with_config(mut self, config: &ValidationConfig) -> Self {
        self.language_source = config.language_source;
        self
    }

    /// The vocabularies this validator checks against.
    #[must_use]
    pub fn vocabularies(&self) -> &'v ReferenceVocabularies {
        self.vocabularies
    }

    /// Validate a field mapping.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Structure`] naming every key that is missing,
    /// mistyped or unknown, or [`MetadataError::Tags`] with one entry per field
    /// whose values fall outside their vocabulary or pattern.
    pub fn validate(&self, mapping: &Map<String, Value>) -> Result<DatasetMetadata, MetadataError> {
        let mut inputs = precheck(mapping).map_err(MetadataError::Structure)?;

        // The languages rule reads either its own list or language_creators.
        let language_input = match self.language_source {
            LanguageSource::LanguageCreators => inputs
                .get(&Field::LanguageCreators)
                .cloned()
                .unwrap_or_default(),
            LanguageSource::Languages => inputs.get(&Field::Languages).cloned().unwrap_or_default(),
        };
        inputs.insert(Field::Languages, language_input);

        let mut accepted = BTreeMap::new();
        let mut report = ValidationReport::default();
        for rule in &FIELD_RULES {
            let values = inputs.remove(&rule.field).unwrap_or_default();
            if rule.field == Field::Languages
                && self.language_source == LanguageSource::LanguageCreators
            {
                // Creator roles are rarely language tags; the check is advisory here.
                let supplied = values.clone();
                if let Err(error) = rule.apply(values, self.vocabularies, self.language_tags) {
                    debug!(
                        values = %quoted_list(&error.rejected),
                        "language creators are not language tags, keeping them as languages"
                    );
                }
                accepted.insert(rule.field, supplied);
                continue;
            }
            match rule.apply(values, self.vocabularies, self.language_tags) {
                Ok(values) => {
                    accepted.insert(rule.field, values);
                }
                Err(error) => report.insert(error),
            }
        }

        if !report.is_empty() {
            debug!(failed_fields = report.len(), "metadata rejected");
            return Err(MetadataError::Tags(report));
        }
        debug!("metadata accepted");
        Ok(DatasetMetadata::from_accepted(accepted))
    }

    /// Validate a YAML mapping given as text.
    ///
    /// # Errors
    ///
    /// Returns a YAML error if `yaml` does not parse to a mapping, otherwise
    /// the errors of [`MetadataValidator::validate`].
    pub fn validate_yaml_str(&self, yaml: &str) -> Result<DatasetMetadata, MetadataError> {
        self.validate(&parse_metadata_block(yaml)?)
    }

    /// Validate the front matter block of a document.
    ///
    /// `origin` names the document in the error raised when it has no block.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NoMetadataBlock`] if the document has no
    /// `---` delimited block, otherwise the errors of
    /// [`MetadataValidator::validate_yaml_str`].
    pub fn validate_document(
        &self,
        document: &str,
        origin: &str,
    ) -> Result<DatasetMetadata, MetadataError> {
        let block =
            extract_front_matter_block(document).ok_or_else(|| MetadataError::NoMetadataBlock {
                origin: origin.to_owned(),
            })?;
        self.validate_yaml_str(&block)
    }

    /// Read a dataset card from disk and validate its front matter.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Io`] if the file cannot be read, otherwise the
    /// errors of [`MetadataValidator::validate_document`].
    pub fn validate_file(&self, path: &Path) -> Result<DatasetMetadata, MetadataError> {
        let document = fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "validating dataset card");
        self.validate_document(&document, &path.display().to_string())
    }
}

/// Check that every field is a non-empty list of strings and no unknown key is present.
///
/// Checks every key before returning, so the report names all offenders.
fn precheck(mapping: &Map<String, Value>) -> Result<BTreeMap<Field, Vec<String>>, StructuralReport> {
    let mut report = StructuralReport::default();
    let mut inputs = BTreeMap::new();

    for field in Field::ALL {
        let name = field.as_str();
        match mapping.get(name) {
            None => report.push(name, StructuralProblem::Missing),
            Some(Value::Array(items)) if items.is_empty() => {
                report.push(name, StructuralProblem::Empty);
            }
            Some(Value::Array(items)) => {
                let strings: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_owned))
                    .collect();
                match strings {
                    Some(strings) => {
                        inputs.insert(field, strings);
                    }
                    None => report.push(name, StructuralProblem::NotStrings),
                }
            }
            Some(_) => report.push(name, StructuralProblem::NotASequence),
        }
    }

    for key in mapping.keys() {
        if Field::from_name(key).is_none() {
            report.push(key.as_str(), StructuralProblem::Unknown);
        }
    }

    if report.is_empty() {
        Ok(inputs)
    } else {
        Err(report)
    }
}
