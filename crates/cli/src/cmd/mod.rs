pub mod codec;
pub mod defaults;
pub mod doctor;
pub mod output;
pub mod sort;
pub mod types;
pub mod validate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pagefields_core::config::{CmsConfig, ConfigLoader, ContentEntry, ResolvedConfig, SchemaLoader};
use pagefields_core::entry::{self, EntryDocument, EntryFormat};
use pagefields_core::types::FieldRegistry;

/// Everything a command needs: the resolved profile, the content
/// configuration and the field registry.
pub struct Workspace {
    pub rc: ResolvedConfig,
    pub cms: CmsConfig,
    pub registry: Arc<FieldRegistry>,
}

impl Workspace {
    /// Load the workspace, exiting with status 1 on any error.
    pub fn load(config: Option<&Path>, profile: Option<&str>) -> Self {
        let rc = match ConfigLoader::load(config, profile) {
            Ok(rc) => rc,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        };

        let cms = match SchemaLoader::load(&rc.schema_path) {
            Ok(cms) => cms,
            Err(e) => {
                eprintln!("Error loading content configuration: {}", e);
                std::process::exit(1);
            }
        };

        let registry = match FieldRegistry::builtin() {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Error building field registry: {}", e);
                std::process::exit(1);
            }
        };

        Self { rc, cms, registry }
    }

    /// Content entry by name, exiting with status 1 if it is not configured.
    pub fn entry(&self, name: &str) -> &ContentEntry {
        match self.cms.entry(name) {
            Some(entry) => entry,
            None => {
                eprintln!("Error: Unknown content entry '{}'", name);
                let names = self.cms.entry_names();
                if !names.is_empty() {
                    eprintln!("Available entries: {}", names.join(", "));
                }
                std::process::exit(1);
            }
        }
    }

    /// Absolute paths are kept; relative ones are taken from `repo_root`.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.rc.repo_root.join(path) }
    }
}

/// On-disk layout of a file of an entry: the configured format, else the extension.
pub fn entry_format(entry: &ContentEntry, path: &Path) -> EntryFormat {
    entry.format.unwrap_or_else(|| EntryFormat::from_path(path))
}

/// Read and parse an entry file, exiting with status 1 on failure.
pub fn read_document(path: &Path, format: EntryFormat) -> EntryDocument {
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }
    };

    match entry::parse(&content, format) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error parsing {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }
}

/// Declared field names, in declaration order.
pub fn field_order(entry: &ContentEntry) -> Vec<String> {
    entry.fields.iter().map(|f| f.name.clone()).collect()
}
