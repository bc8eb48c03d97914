//! Content configuration: media settings, content entries and reusable components.
//!
//! This is the settings file kept in the content repository (usually
//! `.pages.yml`). Field schema builders and transforms receive it so they
//! can consult settings outside their own declaration.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entry::EntryFormat;
use crate::types::schema::Field;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("content configuration not found at {0}")]
    NotFound(String),

    #[error("failed to read content configuration {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse content configuration {0}: {1}")]
    ParseError(String, #[source] serde_yaml::Error),

    #[error("duplicate content entry: {0}")]
    DuplicateEntry(String),
}

/// Where media files live in the repository and how the site refers to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaConfig {
    /// Repository folder holding media (e.g. `public/images`).
    pub input: String,
    /// Path prefix used in stored content (e.g. `/images`).
    pub output: String,
    /// Allowed file extensions, without the dot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A folder of entries sharing one schema.
    #[default]
    Collection,
    /// A single file.
    File,
}

/// One editable content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ContentKind,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<EntryFormat>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// The whole content configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaConfig>,
    #[serde(default)]
    pub content: Vec<ContentEntry>,
    /// Reusable declarations referenced with `component: <name>`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub components: BTreeMap<String, Field>,
}

impl CmsConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(s)
    }

    /// Find a content entry by name.
    pub fn entry(&self, name: &str) -> Option<&ContentEntry> {
        self.content.iter().find(|e| e.name == name)
    }

    pub fn component(&self, name: &str) -> Option<&Field> {
        self.components.get(name)
    }

    pub fn entry_names(&self) -> Vec<&str> {
        self.content.iter().map(|e| e.name.as_str()).collect()
    }
}

/// Loads the content configuration from disk.
pub struct SchemaLoader;

impl SchemaLoader {
    pub fn load(path: &Path) -> Result<CmsConfig, SchemaError> {
        if !path.exists() {
            return Err(SchemaError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(path)
            .map_err(|e| SchemaError::ReadError(path.display().to_string(), e))?;

        let config = CmsConfig::from_yaml_str(&s)
            .map_err(|e| SchemaError::ParseError(path.display().to_string(), e))?;

        let mut seen = HashSet::new();
        for entry in &config.content {
            if !seen.insert(entry.name.as_str()) {
                return Err(SchemaError::DuplicateEntry(entry.name.clone()));
            }
        }

        tracing::debug!(
            path = %path.display(),
            entries = config.content.len(),
            components = config.components.len(),
            "loaded content configuration"
        );
        Ok(config)
    }
}
