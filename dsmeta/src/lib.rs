//! # dsmeta
//!
//! Validator for the YAML metadata block at the top of a dataset card.
//!
//! The block declares annotation and language provenance, languages, licenses,
//! multilinguality, size category, source lineage and task taxonomy. Each field
//! is checked against a curated reference vocabulary, and every failing field is
//! reported together rather than stopping at the first one.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use dsmeta::{MetadataValidator, ReferenceVocabularies};
//!
//! let vocabularies = ReferenceVocabularies::bundled().unwrap();
//! let validator = MetadataValidator::new(&vocabularies);
//!
//! match validator.validate_file(Path::new("README.md")) {
//!     Ok(metadata) => println!("licenses: {:?}", metadata.licenses()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

mod config;
mod error;
mod field;
mod frontmatter;
mod langtag;
mod metadata;
mod report;
pub mod rules;
mod validator;
pub mod vocab;

pub use config::{LanguageSource, ValidationConfig};
pub use error::{MetadataError, VocabularyError};
pub use field::Field;
pub use frontmatter::{extract_front_matter_block, parse_metadata_block};
pub use langtag::{BCP47_REFERENCE_URL, Bcp47, LanguageTagChecker};
pub use metadata::DatasetMetadata;
pub use report::{FieldError, StructuralIssue, StructuralProblem, StructuralReport, ValidationReport};
pub use validator::MetadataValidator;
pub use vocab::ReferenceVocabularies;
