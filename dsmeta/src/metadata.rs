//! The validated dataset metadata record.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::field::Field;

/// Dataset card metadata that passed validation.
///
/// Only [`MetadataValidator`](crate::MetadataValidator) builds this record, and
/// only when every field passed, so every list is non-empty and every value is
/// either registered or matched an escape hatch. Fields with an escape hatch
/// list their checked values first and their escaped values after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata {
    annotations_creators: Vec<String>,
    language_creators: Vec<String>,
    languages: Vec<String>,
    licenses: Vec<String>,
    multilinguality: Vec<String>,
    size_categories: Vec<String>,
    source_datasets: Vec<String>,
    task_categories: Vec<String>,
    task_ids: Vec<String>,
}

impl DatasetMetadata {
    /// Assemble the record from accepted values; absent fields become empty lists.
    pub(crate) fn from_accepted(mut accepted: BTreeMap<Field, Vec<String>>) -> Self {
        let mut take = |field: Field| accepted.remove(&field).unwrap_or_default();
        Self {
            annotations_creators: take(Field::AnnotationsCreators),
            language_creators: take(Field::LanguageCreators),
            languages: take(Field::Languages),
            licenses: take(Field::Licenses),
            multilinguality: take(Field::Multilinguality),
            size_categories: take(Field::SizeCategories),
            source_datasets: take(Field::SourceDatasets),
            task_categories: take(Field::TaskCategories),
            task_ids: take(Field::TaskIds),
        }
    }

    /// The values of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &[String] {
        match field {
            Field::AnnotationsCreators => &self.annotations_creators,
            Field::LanguageCreators => &self.language_creators,
            Field::Languages => &self.languages,
            Field::Licenses => &self.licenses,
            Field::Multilinguality => &self.multilinguality,
            Field::SizeCategories => &self.size_categories,
            Field::SourceDatasets => &self.source_datasets,
            Field::TaskCategories => &self.task_categories,
            Field::TaskIds => &self.task_ids,
        }
    }

    #[must_use]
    pub fn annotations_creators(&self) -> &[String] {
        &self.annotations_creators
    }

    #[must_use]
    pub fn language_creators(&self) -> &[String] {
        &self.language_creators
    }

    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn licenses(&self) -> &[String] {
        &self.licenses
    }

    #[must_use]
    pub fn multilinguality(&self) -> &[String] {
        &self.multilinguality
    }

    #[must_use]
    pub fn size_categories(&self) -> &[String] {
        &self.size_categories
    }

    #[must_use]
    pub fn source_datasets(&self) -> &[String] {
        &self.source_datasets
    }

    #[must_use]
    pub fn task_categories(&self) -> &[String] {
        &self.task_categories
    }

    #[must_use]
    pub fn task_ids(&self) -> &[String] {
        &self.task_ids
    }
}
