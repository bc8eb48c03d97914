//! Media path types: image and file.
//!
//! Stored content refers to media through the public `media.output` prefix
//! while the editor works with repository paths under `media.input`.

use serde_yaml::Value;

use super::compare_text;
use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::{FieldError, TransformError};
use crate::types::schema::Field;
use crate::types::validation::{PathRules, Schema, yaml_type_name};

const IMAGE_EXTENSIONS: &[&str] = &["apng", "avif", "gif", "jpeg", "jpg", "png", "svg", "webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    File,
}

/// Replace the leading `from` path prefix of `path` with `to`.
///
/// Paths outside `from` are returned unchanged. An empty `from` matches every
/// relative path, so `to` is prepended to it; empty paths, absolute paths and
/// URLs are left alone.
pub fn swap_prefix(path: &str, from: &str, to: &str) -> String {
    let from = from.trim_end_matches('/');
    let to = to.trim_end_matches('/');
    if from.is_empty() {
        if to.is_empty() || path.is_empty() || path.starts_with('/') || path.contains("://") {
            return path.to_string();
        }
        return format!("{}/{}", to, path);
    }
    match path.strip_prefix(from) {
        Some("") => to.to_string(),
        Some(rest) if rest.starts_with('/') => {
            if to.is_empty() {
                rest.trim_start_matches('/').to_string()
            } else {
                format!("{}{}", to, rest)
            }
        }
        _ => path.to_string(),
    }
}

fn map_paths(value: &Value, swap: &dyn Fn(&str) -> String) -> Result<Value, TransformError> {
    match value {
        Value::String(s) => Ok(Value::String(swap(s))),
        Value::Sequence(items) => {
            items.iter().map(|item| map_paths(item, swap)).collect::<Result<_, _>>().map(Value::Sequence)
        }
        other => Err(TransformError::UnexpectedShape {
            expected: "path".into(),
            actual: yaml_type_name(other),
        }),
    }
}

fn read(value: &Value, _field: &Field, config: &CmsConfig) -> Result<Value, TransformError> {
    match &config.media {
        Some(media) => map_paths(value, &|p: &str| swap_prefix(p, &media.output, &media.input)),
        None => Ok(value.clone()),
    }
}

fn write(value: &Value, _field: &Field, config: &CmsConfig) -> Result<Value, TransformError> {
    match &config.media {
        Some(media) => map_paths(value, &|p: &str| swap_prefix(p, &media.input, &media.output)),
        None => Ok(value.clone()),
    }
}

fn extensions(field: &Field, config: &CmsConfig, kind: MediaKind) -> Result<Vec<String>, FieldError> {
    let normalize = |ext: &str| ext.trim_start_matches('.').to_lowercase();

    if let Some(value) = field.option("extensions") {
        let Value::Sequence(items) = value else {
            return Err(FieldError::InvalidOption {
                path: field.name.clone(),
                option: "extensions".into(),
                message: "expected a list of extensions".into(),
            });
        };
        return items
            .iter()
            .map(|item| {
                item.as_str().map(normalize).ok_or_else(|| FieldError::InvalidOption {
                    path: field.name.clone(),
                    option: "extensions".into(),
                    message: "extensions must be strings".into(),
                })
            })
            .collect();
    }

    if let Some(media) = &config.media
        && !media.extensions.is_empty()
    {
        return Ok(media.extensions.iter().map(|e| normalize(e)).collect());
    }

    Ok(match kind {
        MediaKind::Image => IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        MediaKind::File => Vec::new(),
    })
}

pub fn module(kind: MediaKind) -> FieldModule {
    let (label, edit, view) = match kind {
        MediaKind::Image => ("Image", "image-picker", "image-view"),
        MediaKind::File => ("File", "file-picker", "file-view"),
    };
    FieldModule::new()
        .with_label(label)
        .with_schema(move |field, config| {
            Ok(Schema::Path(PathRules {
                extensions: extensions(field, config, kind)?,
                multiple: field.option_bool("multiple").unwrap_or(false),
            }))
        })
        .with_read(read)
        .with_write(write)
        .with_sort(|a, b, _| compare_text(a, b))
        .with_components(edit, view)
}
