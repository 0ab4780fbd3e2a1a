//! Validation report types.
//!
//! Both reports aggregate every problem found in one pass: a document is never
//! rejected one field at a time.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::field::Field;

/// Render values as a bracketed, quoted list: `["a", "b"]`.
pub(crate) fn quoted_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Every rejected value of a single field, with a pointer to the authoritative reference.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FieldError {
    /// The field that failed.
    pub field: Field,
    /// All values of the field that were rejected, in input order.
    pub rejected: Vec<String>,
    /// Where to look up the permitted values (URL, file path or a short note).
    pub reference: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl FieldError {
    pub(crate) fn unregistered(field: Field, rejected: Vec<String>, reference: &str) -> Self {
        let message = format!(
            "{} are not registered tags for '{field}', reference at {reference}",
            quoted_list(&rejected)
        );
        Self {
            field,
            rejected,
            reference: reference.to_owned(),
            message,
        }
    }

    pub(crate) fn unrecognised_language(
        field: Field,
        rejected: Vec<String>,
        reference: &str,
    ) -> Self {
        let message = format!(
            "{} are not recognised as valid language codes (BCP47 norm), you can refer to {reference}",
            quoted_list(&rejected)
        );
        Self {
            field,
            rejected,
            reference: reference.to_owned(),
            message,
        }
    }

    pub(crate) fn invalid_lineage(field: Field, rejected: Vec<String>, reference: &str) -> Self {
        let message = format!(
            "'{field}' has invalid values: {}, {reference}",
            quoted_list(&rejected)
        );
        Self {
            field,
            rejected,
            reference: reference.to_owned(),
            message,
        }
    }
}

/// Per-field tag errors from one validation call.
///
/// Contains an entry only for fields that failed; iteration follows field
/// declaration order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: BTreeMap<Field, FieldError>,
}

impl ValidationReport {
    pub(crate) fn insert(&mut self, error: FieldError) {
        self.errors.insert(error.field, error);
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Names of the failing fields.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// All field errors, in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.values()
    }

    /// Format the report for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let mut lines = vec!["Could not validate the metadata, found the following errors:".to_owned()];
        for error in self.errors.values() {
            lines.push(format!("* field '{}':\n\t{}", error.field, error.message));
        }
        lines.join("\n")
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_human_readable())
    }
}

/// Why a key failed the structural precheck.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StructuralProblem {
    /// A required field is absent.
    Missing,
    /// The value is not a sequence.
    NotASequence,
    /// The sequence has no elements.
    Empty,
    /// The sequence holds something other than strings.
    NotStrings,
    /// The key is not one of the nine metadata fields.
    Unknown,
}

impl fmt::Display for StructuralProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Missing => "missing",
            Self::NotASequence => "not a list",
            Self::Empty => "empty list",
            Self::NotStrings => "list contains non-string values",
            Self::Unknown => "unknown field",
        };
        f.write_str(text)
    }
}

/// A key that failed the structural precheck.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct StructuralIssue {
    /// The offending key as written in the mapping.
    pub field: String,
    pub problem: StructuralProblem,
}

/// Every key that is missing, mistyped or unexpected.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StructuralReport {
    issues: Vec<StructuralIssue>,
}

impl StructuralReport {
    pub(crate) fn push(&mut self, field: impl Into<String>, problem: StructuralProblem) {
        self.issues.push(StructuralIssue {
            field: field.into(),
            problem,
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn issues(&self) -> &[StructuralIssue] {
        &self.issues
    }

    /// Names of the offending keys.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }

    /// Format the report for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let entries: Vec<String> = self
            .issues
            .iter()
            .map(|issue| format!("'{}' ({})", issue.field, issue.problem))
            .collect();
        format!(
            "Found fields that are not non-empty lists of strings: {}",
            entries.join(", ")
        )
    }
}

impl fmt::Display for StructuralReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_human_readable())
    }
}
