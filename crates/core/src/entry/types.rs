//! Entry document types.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// On-disk layout of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryFormat {
    /// Markdown with a `---` delimited YAML block.
    #[default]
    YamlFrontmatter,
    Yaml,
    Json,
}

impl EntryFormat {
    /// Guess the format from a file extension; markdown when unknown.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yml" | "yaml") => Self::Yaml,
            Some("json") => Self::Json,
            _ => Self::YamlFrontmatter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::YamlFrontmatter => "yaml-frontmatter",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

/// Parsed entry: ordered field values plus the markdown body, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDocument {
    pub fields: Mapping,
    /// Markdown body; `None` for YAML and JSON entries.
    pub body: Option<String>,
}

impl EntryDocument {
    pub fn new(fields: Mapping) -> Self {
        Self { fields, body: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_extension() {
        assert_eq!(EntryFormat::from_path(&PathBuf::from("a/b.md")), EntryFormat::YamlFrontmatter);
        assert_eq!(EntryFormat::from_path(&PathBuf::from("a/b.YAML")), EntryFormat::Yaml);
        assert_eq!(EntryFormat::from_path(&PathBuf::from("data.json")), EntryFormat::Json);
        assert_eq!(EntryFormat::from_path(&PathBuf::from("README")), EntryFormat::YamlFrontmatter);
    }

    #[test]
    fn format_deserializes_kebab_case() {
        let f: EntryFormat = serde_yaml::from_str("yaml-frontmatter").unwrap();
        assert_eq!(f, EntryFormat::YamlFrontmatter);
        assert_eq!(f.as_str(), "yaml-frontmatter");
    }
}
