//! Front matter extraction and YAML decoding of the metadata block.

use serde_json::{Map, Value};

use crate::error::MetadataError;

/// Delimiter line that opens and closes the front matter block.
const DELIMITER: &str = "---";

/// Return the YAML text between the leading `---` line and the next `---` line.
///
/// Returns `None` if the first line is not a delimiter or the block is never closed.
/// Delimiter lines are compared after trimming; block lines keep their indentation.
#[must_use]
pub fn extract_front_matter_block(document: &str) -> Option<String> {
    let mut lines = document.lines();
    if lines.next()?.trim() != DELIMITER {
        return None;
    }

    let mut block: Vec<&str> = Vec::new();
    for line in lines {
        if line.trim() == DELIMITER {
            return Some(block.join("\n"));
        }
        block.push(line.trim_end());
    }
    None
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

/// Decode a YAML metadata block into a field mapping.
///
/// A blank or null block decodes to an empty mapping.
///
/// # Errors
///
/// Returns [`MetadataError::Yaml`] if the text is not valid YAML, or
/// [`MetadataError::NotAMapping`] if its top level is not a mapping.
pub fn parse_metadata_block(yaml: &str) -> Result<Map<String, Value>, MetadataError> {
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_saphyr::from_str(yaml).map_err(|err| MetadataError::Yaml {
        message: err.to_string(),
    })?;
    match value {
        Value::Object(mapping) => Ok(mapping),
        Value::Null => Ok(Map::new()),
        other => Err(MetadataError::NotAMapping {
            found: kind_of(&other),
        }),
    }
}
