//! Error types for metadata validation and vocabulary loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::report::{StructuralReport, ValidationReport};

/// Why a document could not be turned into a [`DatasetMetadata`](crate::DatasetMetadata).
///
/// Every variant is terminal: the input must be corrected before it can pass.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MetadataError {
    /// Required fields are missing, not lists, not lists of strings, or unexpected.
    #[error("{0}")]
    Structure(StructuralReport),

    /// One or more fields hold values outside their vocabulary or pattern.
    #[error("{0}")]
    Tags(ValidationReport),

    /// The document has no `---` delimited metadata block.
    #[error("did not find a yaml block in '{origin}'")]
    NoMetadataBlock {
        /// Where the document came from (a path or a caller-supplied label).
        origin: String,
    },

    /// The metadata block is not parseable YAML.
    #[error("metadata block is not valid YAML: {message}")]
    Yaml { message: String },

    /// The metadata block parsed, but its top level is not a mapping.
    #[error("metadata block must be a mapping of field names to lists, found {found}")]
    NotAMapping { found: &'static str },

    /// The document could not be read.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MetadataError {
    /// The tag report, if this is a tag validation failure.
    #[must_use]
    pub fn tag_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Tags(report) => Some(report),
            _ => None,
        }
    }

    /// The structural report, if this is a structural failure.
    #[must_use]
    pub fn structural_report(&self) -> Option<&StructuralReport> {
        match self {
            Self::Structure(report) => Some(report),
            _ => None,
        }
    }
}

/// A bundled or on-disk vocabulary resource could not be loaded.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VocabularyError {
    #[error("failed to read vocabulary resource '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("vocabulary resource '{resource}' is malformed: {source}")]
    Parse {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}
