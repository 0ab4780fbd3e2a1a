//! The nine metadata fields a dataset card must declare.

use std::fmt;

use serde::Serialize;

/// A metadata field name.
///
/// Variants are declared in the order reports list them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    AnnotationsCreators,
    LanguageCreators,
    Languages,
    Licenses,
    Multilinguality,
    SizeCategories,
    SourceDatasets,
    TaskCategories,
    TaskIds,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::AnnotationsCreators,
        Self::LanguageCreators,
        Self::Languages,
        Self::Licenses,
        Self::Multilinguality,
        Self::SizeCategories,
        Self::SourceDatasets,
        Self::TaskCategories,
        Self::TaskIds,
    ];

    /// The key used for this field in the YAML block.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnnotationsCreators => "annotations_creators",
            Self::LanguageCreators => "language_creators",
            Self::Languages => "languages",
            Self::Licenses => "licenses",
            Self::Multilinguality => "multilinguality",
            Self::SizeCategories => "size_categories",
            Self::SourceDatasets => "source_datasets",
            Self::TaskCategories => "task_categories",
            Self::TaskIds => "task_ids",
        }
    }

    /// Look up a field by its YAML key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
