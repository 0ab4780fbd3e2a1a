//! Reference vocabularies: the curated tag sets each field is checked against.
//!
//! The five resources ship inside the crate and are parsed once by the caller
//! (normally at startup) into a [`ReferenceVocabularies`] value that is then
//! shared read-only by every validation.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::VocabularyError;

/// Upstream location of the bundled resources, quoted in error messages.
pub const REFERENCE_BASE_URL: &str =
    "https://github.com/huggingface/datasets/tree/master/src/datasets/utils/resources";

pub const LICENSES_RESOURCE: &str = "licenses.json";
pub const TASKS_RESOURCE: &str = "tasks.json";
pub const CREATORS_RESOURCE: &str = "creators.json";
pub const SIZE_CATEGORIES_RESOURCE: &str = "size_categories.json";
pub const MULTILINGUALITIES_RESOURCE: &str = "multilingualities.json";

/// One task category of the taxonomy tree.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct TaskCategory {
    #[serde(default)]
    pub description: Option<String>,
    /// Task ids belonging to this category.
    pub options: Vec<String>,
}

impl TaskCategory {
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self {
            description: None,
            options,
        }
    }
}

/// Permitted creator roles, split by what was created.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct CreatorRoles {
    /// Who produced the annotations.
    pub annotations: Vec<String>,
    /// Who produced the language data.
    pub language: Vec<String>,
}

impl CreatorRoles {
    #[must_use]
    pub fn new(annotations: Vec<String>, language: Vec<String>) -> Self {
        Self {
            annotations,
            language,
        }
    }
}

/// In-memory vocabulary data, as decoded from the resource files.
///
/// Licenses and multilinguality categories are keyed mappings; only their keys
/// are used for validation.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct VocabularyData {
    pub licenses: BTreeMap<String, serde_json::Value>,
    pub task_taxonomy: BTreeMap<String, TaskCategory>,
    pub creators: CreatorRoles,
    pub size_categories: Vec<String>,
    pub multilingualities: BTreeMap<String, serde_json::Value>,
}

/// A fixed set of permitted values plus where to read about them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tagset {
    values: BTreeSet<String>,
    reference: String,
}

impl Tagset {
    fn new(values: impl IntoIterator<Item = String>, reference: String) -> Self {
        Self {
            values: values.into_iter().collect(),
            reference,
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    /// URL or path of the resource this set was loaded from.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Names a tag set inside [`ReferenceVocabularies`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vocabulary {
    AnnotationCreators,
    LanguageCreators,
    Licenses,
    Multilingualities,
    SizeCategories,
    TaskCategories,
    /// Union of the task ids of every category.
    TaskIds,
}

/// Raw content of one resource and the reference to quote for it.
struct Resource {
    name: &'static str,
    content: String,
    reference: String,
}

impl Resource {
    fn parse<T: DeserializeOwned>(&self) -> Result<T, VocabularyError> {
        serde_json::from_str(&self.content).map_err(|source| VocabularyError::Parse {
            resource: self.name.to_owned(),
            source,
        })
    }
}

/// The five reference vocabularies, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct ReferenceVocabularies {
    licenses: Tagset,
    task_categories: Tagset,
    task_ids: Tagset,
    annotation_creators: Tagset,
    language_creators: Tagset,
    size_categories: Tagset,
    multilingualities: Tagset,
    task_taxonomy: BTreeMap<String, TaskCategory>,
}

impl ReferenceVocabularies {
    /// Parse the resources embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded resource is malformed. This indicates a
    /// packaging defect; callers should treat it as fatal.
    pub fn bundled() -> Result<Self, VocabularyError> {
        let embedded = |name: &'static str, content: &str| Resource {
            name,
            content: content.to_owned(),
            reference: format!("{REFERENCE_BASE_URL}/{name}"),
        };
        Self::from_resources([
            embedded(LICENSES_RESOURCE, include_str!("../resources/licenses.json")),
            embedded(TASKS_RESOURCE, include_str!("../resources/tasks.json")),
            embedded(CREATORS_RESOURCE, include_str!("../resources/creators.json")),
            embedded(
                SIZE_CATEGORIES_RESOURCE,
                include_str!("../resources/size_categories.json"),
            ),
            embedded(
                MULTILINGUALITIES_RESOURCE,
                include_str!("../resources/multilingualities.json"),
            ),
        ])
    }

    /// Load the five resources from `dir`, using the file paths as references.
    ///
    /// # Errors
    ///
    /// Returns an error if any resource file is missing, unreadable or malformed.
    pub fn from_dir(dir: &Path) -> Result<Self, VocabularyError> {
        let read = |name: &'static str| -> Result<Resource, VocabularyError> {
            let path = dir.join(name);
            let content = fs::read_to_string(&path).map_err(|source| VocabularyError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(Resource {
                name,
                content,
                reference: path.display().to_string(),
            })
        };
        Self::from_resources([
            read(LICENSES_RESOURCE)?,
            read(TASKS_RESOURCE)?,
            read(CREATORS_RESOURCE)?,
            read(SIZE_CATEGORIES_RESOURCE)?,
            read(MULTILINGUALITIES_RESOURCE)?,
        ])
    }

    /// Build from already-decoded data; references are the resource file names.
    #[must_use]
    pub fn from_data(data: VocabularyData) -> Self {
        Self::assemble(data, str::to_owned)
    }

    fn from_resources(resources: [Resource; 5]) -> Result<Self, VocabularyError> {
        let [licenses, tasks, creators, size_categories, multilingualities] = resources;
        let data = VocabularyData {
            licenses: licenses.parse()?,
            task_taxonomy: tasks.parse()?,
            creators: creators.parse()?,
            size_categories: size_categories.parse()?,
            multilingualities: multilingualities.parse()?,
        };
        let references: BTreeMap<&str, String> = [
            licenses,
            tasks,
            creators,
            size_categories,
            multilingualities,
        ]
        .into_iter()
        .map(|resource| (resource.name, resource.reference))
        .collect();

        Ok(Self::assemble(data, |name| {
            references
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.to_owned())
        }))
    }

    fn assemble(data: VocabularyData, reference: impl Fn(&str) -> String) -> Self {
        let task_ids = data
            .task_taxonomy
            .values()
            .flat_map(|category| category.options.iter().cloned());

        let vocabularies = Self {
            licenses: Tagset::new(data.licenses.into_keys(), reference(LICENSES_RESOURCE)),
            task_categories: Tagset::new(
                data.task_taxonomy.keys().cloned(),
                reference(TASKS_RESOURCE),
            ),
            task_ids: Tagset::new(task_ids, reference(TASKS_RESOURCE)),
            annotation_creators: Tagset::new(
                data.creators.annotations,
                reference(CREATORS_RESOURCE),
            ),
            language_creators: Tagset::new(data.creators.language, reference(CREATORS_RESOURCE)),
            size_categories: Tagset::new(
                data.size_categories,
                reference(SIZE_CATEGORIES_RESOURCE),
            ),
            multilingualities: Tagset::new(
                data.multilingualities.into_keys(),
                reference(MULTILINGUALITIES_RESOURCE),
            ),
            task_taxonomy: data.task_taxonomy,
        };

        debug!(
            licenses = vocabularies.licenses.len(),
            task_categories = vocabularies.task_categories.len(),
            task_ids = vocabularies.task_ids.len(),
            size_categories = vocabularies.size_categories.len(),
            multilingualities = vocabularies.multilingualities.len(),
            "loaded reference vocabularies"
        );
        vocabularies
    }

    /// The tag set named by `vocabulary`.
    #[must_use]
    pub fn tagset(&self, vocabulary: Vocabulary) -> &Tagset {
        match vocabulary {
            Vocabulary::AnnotationCreators => &self.annotation_creators,
            Vocabulary::LanguageCreators => &self.language_creators,
            Vocabulary::Licenses => &self.licenses,
            Vocabulary::Multilingualities => &self.multilingualities,
            Vocabulary::SizeCategories => &self.size_categories,
            Vocabulary::TaskCategories => &self.task_categories,
            Vocabulary::TaskIds => &self.task_ids,
        }
    }

    /// The task taxonomy tree: category name to its task ids.
    #[must_use]
    pub fn task_taxonomy(&self) -> &BTreeMap<String, TaskCategory> {
        &self.task_taxonomy
    }
}
