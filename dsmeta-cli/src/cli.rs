use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use dsmeta::{MetadataValidator, ReferenceVocabularies};
use tracing::debug;

/// Validate the YAML metadata block of a dataset README.md file.
#[derive(Debug, Parser)]
#[command(name = "dsmeta", version, about)]
struct Cli {
    /// Path to the dataset card whose front matter should be validated
    readme_filepath: PathBuf,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let vocabularies = ReferenceVocabularies::bundled()?;
    let validator = MetadataValidator::new(&vocabularies);

    let metadata = validator.validate_file(&cli.readme_filepath)?;
    debug!(
        licenses = metadata.licenses().len(),
        task_ids = metadata.task_ids().len(),
        "validated dataset card"
    );
    println!(
        "{} {}: metadata is valid",
        "\u{2713}".green(),
        cli.readme_filepath.display()
    );
    Ok(())
}
