//! Entry parsing.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use super::types::{EntryDocument, EntryFormat};
use crate::types::validation::yaml_type_name;

/// Errors that can occur while parsing or serializing an entry.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("entry must be a mapping of fields, found {0}")]
    NotAMapping(String),
}

/// Parse entry content in the given format.
///
/// Front matter is delimited by `---` at the start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
/// A markdown document without front matter yields no fields and the whole
/// content as body.
pub fn parse(content: &str, format: EntryFormat) -> Result<EntryDocument, EntryError> {
    match format {
        EntryFormat::YamlFrontmatter => parse_frontmatter(content),
        EntryFormat::Yaml => Ok(EntryDocument::new(yaml_mapping(content)?)),
        EntryFormat::Json => {
            if content.trim().is_empty() {
                return Ok(EntryDocument::default());
            }
            let json: serde_json::Value = serde_json::from_str(content)?;
            let value = serde_yaml::to_value(json)?;
            Ok(EntryDocument::new(into_mapping(value)?))
        }
    }
}

fn parse_frontmatter(content: &str) -> Result<EntryDocument, EntryError> {
    let trimmed = content.trim_start();

    // Check if document starts with frontmatter delimiter
    if !trimmed.starts_with("---") {
        return Ok(EntryDocument { fields: Mapping::new(), body: Some(content.to_string()) });
    }

    let after_first = &trimmed[3..];

    // Skip the newline after opening ---
    let after_newline = after_first
        .strip_prefix('\n')
        .or_else(|| after_first.strip_prefix("\r\n"))
        .unwrap_or(after_first);

    let Some(end_pos) = find_closing_delimiter(after_newline) else {
        // No closing ---, treat as no frontmatter
        return Ok(EntryDocument { fields: Mapping::new(), body: Some(content.to_string()) });
    };

    let yaml_content = &after_newline[..end_pos];

    // Calculate body start (skip closing --- and following newline)
    let after_closing = &after_newline[end_pos + 3..];
    let body = after_closing
        .strip_prefix('\n')
        .or_else(|| after_closing.strip_prefix("\r\n"))
        .unwrap_or(after_closing)
        .to_string();

    Ok(EntryDocument { fields: yaml_mapping(yaml_content)?, body: Some(body) })
}

fn yaml_mapping(yaml: &str) -> Result<Mapping, EntryError> {
    if yaml.trim().is_empty() {
        return Ok(Mapping::new());
    }
    into_mapping(serde_yaml::from_str(yaml)?)
}

fn into_mapping(value: Value) -> Result<Mapping, EntryError> {
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(EntryError::NotAMapping(yaml_type_name(&other))),
    }
}

/// Find the position of closing `---` delimiter.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim() == "---" {
            return Some(pos + (line.len() - line.trim_start().len()));
        }
        pos += line.len();
    }
    None
}
