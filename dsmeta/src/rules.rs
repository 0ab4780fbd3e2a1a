//! Per-field validation rules.
//!
//! Each of the nine fields is described by a [`FieldRule`] row: how its values
//! are checked, and which values (if any) skip the check because the taxonomy
//! behind them is still moving.

use tracing::warn;

use crate::field::Field;
use crate::langtag::LanguageTagChecker;
use crate::report::{FieldError, quoted_list};
use crate::vocab::{ReferenceVocabularies, Tagset, Vocabulary};

/// Reference quoted when `source_datasets` fails.
pub const SOURCE_LINEAGE_NOTE: &str =
    "expected 'original', 'extended' or 'extended|<source dataset id>'";

/// How the non-escaped values of a field are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Every value must be a member of the vocabulary.
    Tagset(Vocabulary),
    /// Every value must be a valid language tag.
    LanguageTag,
    /// Every value must be `original`, `extended` or start with `extended|`.
    SourceLineage,
}

/// Values matching an escape hatch are accepted without any check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeHatch {
    Prefix(&'static str),
    Contains(&'static str),
}

impl EscapeHatch {
    #[must_use]
    pub fn matches(self, value: &str) -> bool {
        match self {
            Self::Prefix(prefix) => value.starts_with(prefix),
            Self::Contains(needle) => value.contains(needle),
        }
    }
}

/// Validation rule for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub check: Check,
    pub escape: Option<EscapeHatch>,
}

/// The rule table, in field order.
pub static FIELD_RULES: [FieldRule; 9] = [
    FieldRule {
        field: Field::AnnotationsCreators,
        check: Check::Tagset(Vocabulary::AnnotationCreators),
        escape: None,
    },
    FieldRule {
        field: Field::LanguageCreators,
        check: Check::Tagset(Vocabulary::LanguageCreators),
        escape: None,
    },
    FieldRule {
        field: Field::Languages,
        check: Check::LanguageTag,
        escape: None,
    },
    FieldRule {
        field: Field::Licenses,
        check: Check::Tagset(Vocabulary::Licenses),
        escape: Some(EscapeHatch::Contains("-other-")),
    },
    FieldRule {
        field: Field::Multilinguality,
        check: Check::Tagset(Vocabulary::Multilingualities),
        escape: Some(EscapeHatch::Prefix("other")),
    },
    FieldRule {
        field: Field::SizeCategories,
        check: Check::Tagset(Vocabulary::SizeCategories),
        escape: None,
    },
    FieldRule {
        field: Field::SourceDatasets,
        check: Check::SourceLineage,
        escape: None,
    },
    FieldRule {
        field: Field::TaskCategories,
        check: Check::Tagset(Vocabulary::TaskCategories),
        escape: Some(EscapeHatch::Prefix("other")),
    },
    FieldRule {
        field: Field::TaskIds,
        check: Check::Tagset(Vocabulary::TaskIds),
        escape: Some(EscapeHatch::Contains("-other-")),
    },
];

impl FieldRule {
    /// The rule row for `field`.
    #[must_use]
    pub fn for_field(field: Field) -> &'static Self {
        // FIELD_RULES is indexed in Field declaration order.
        &FIELD_RULES[field as usize]
    }

    /// Check `values` against this rule.
    ///
    /// On success returns the checked values followed by the escaped ones.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] listing every rejected value.
    pub fn apply(
        &self,
        values: Vec<String>,
        vocabularies: &ReferenceVocabularies,
        language_tags: &dyn LanguageTagChecker,
    ) -> Result<Vec<String>, FieldError> {
        let (escaped, to_validate) = partition_escaped(values, self.escape, self.field);
        let mut accepted = match self.check {
            Check::Tagset(vocabulary) => {
                validate_tagset(to_validate, vocabularies.tagset(vocabulary), self.field)?
            }
            Check::LanguageTag => validate_language_tags(to_validate, language_tags, self.field)?,
            Check::SourceLineage => validate_source_lineage(to_validate, self.field)?,
        };
        accepted.extend(escaped);
        Ok(accepted)
    }
}

/// Split `values` into `(escaped, to_validate)`, preserving order within each part.
///
/// Escaped values are logged as a warning so operators can audit what skipped
/// strict checking.
#[must_use]
pub fn partition_escaped(
    values: Vec<String>,
    escape: Option<EscapeHatch>,
    field: Field,
) -> (Vec<String>, Vec<String>) {
    let Some(escape) = escape else {
        return (Vec::new(), values);
    };
    let (escaped, to_validate): (Vec<String>, Vec<String>) =
        values.into_iter().partition(|value| escape.matches(value));
    if !escaped.is_empty() {
        warn!(
            field = field.as_str(),
            values = %quoted_list(&escaped),
            "values will escape validation"
        );
    }
    (escaped, to_validate)
}

/// Accept `values` only if every one is in `tagset`.
///
/// # Errors
///
/// Returns a [`FieldError`] listing every value not in `tagset`; none of the
/// values are returned in that case.
pub fn validate_tagset(
    values: Vec<String>,
    tagset: &Tagset,
    field: Field,
) -> Result<Vec<String>, FieldError> {
    let invalid: Vec<String> = values
        .iter()
        .filter(|value| !tagset.contains(value))
        .cloned()
        .collect();
    if invalid.is_empty() {
        Ok(values)
    } else {
        Err(FieldError::unregistered(field, invalid, tagset.reference()))
    }
}

/// Accept `values` only if the checker recognises every one as a language tag.
///
/// # Errors
///
/// Returns a [`FieldError`] listing every unrecognised code.
pub fn validate_language_tags(
    values: Vec<String>,
    checker: &dyn LanguageTagChecker,
    field: Field,
) -> Result<Vec<String>, FieldError> {
    let invalid: Vec<String> = values
        .iter()
        .filter(|code| !checker.is_valid_language_tag(code))
        .cloned()
        .collect();
    if invalid.is_empty() {
        Ok(values)
    } else {
        Err(FieldError::unrecognised_language(
            field,
            invalid,
            checker.reference(),
        ))
    }
}

/// Whether `value` names a permitted source lineage.
#[must_use]
pub fn is_valid_source_lineage(value: &str) -> bool {
    matches!(value, "original" | "extended") || value.starts_with("extended|")
}

/// Accept `values` only if every one is a permitted source lineage.
///
/// # Errors
///
/// Returns a [`FieldError`] listing every invalid value.
pub fn validate_source_lineage(
    values: Vec<String>,
    field: Field,
) -> Result<Vec<String>, FieldError> {
    let invalid: Vec<String> = values
        .iter()
        .filter(|value| !is_valid_source_lineage(value))
        .cloned()
        .collect();
    if invalid.is_empty() {
        Ok(values)
    } else {
        Err(FieldError::invalid_lineage(field, invalid, SOURCE_LINEAGE_NOTE))
    }
}
