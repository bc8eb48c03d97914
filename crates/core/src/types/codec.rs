//! Conversion between stored values and the values the editor works with.
//!
//! `null` is never handed to a transform. Types without a transform keep
//! their value as is.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use super::errors::{CodecError, TransformError};
use super::registry::FieldRegistry;
use super::resolver::expand_component;
use super::schema::Field;
use super::validation::{join_path, scalar_text};
use crate::config::CmsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Read,
    Write,
}

/// A field whose stored value could not be read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFailure {
    pub path: String,
    pub message: String,
}

/// An entry decoded for editing.
///
/// Fields in `failures` keep their raw stored value in `values`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecodedEntry {
    pub values: Mapping,
    pub failures: Vec<FieldFailure>,
}

impl DecodedEntry {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Convert a stored value into its edit representation.
pub fn read_value(
    value: &Value,
    field: &Field,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Value, CodecError> {
    transform(Direction::Read, value, field, &field.name, config, registry)
}

/// Convert an edited value back into its stored representation.
pub fn write_value(
    value: &Value,
    field: &Field,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Value, CodecError> {
    transform(Direction::Write, value, field, &field.name, config, registry)
}

/// Read every declared field of a stored entry.
///
/// A field that fails to read is reported and keeps its raw value; the rest
/// of the entry is still decoded.
pub fn read_entry(
    entry: &Mapping,
    fields: &[Field],
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> DecodedEntry {
    let mut decoded = DecodedEntry { values: entry.clone(), failures: Vec::new() };

    for field in fields {
        let Some(value) = entry.get(field.name.as_str()) else {
            continue;
        };
        match transform(Direction::Read, value, field, &field.name, config, registry) {
            Ok(read) => {
                decoded.values.insert(Value::String(field.name.clone()), read);
            }
            Err(e) => {
                tracing::warn!(path = %e.path, error = %e.source, "could not parse value");
                decoded.failures.push(FieldFailure {
                    path: e.path,
                    message: format!("could not parse value: {}", e.source),
                });
            }
        }
    }

    decoded
}

/// Write every declared field of an edited entry.
pub fn write_entry(
    values: &Mapping,
    fields: &[Field],
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Mapping, CodecError> {
    transform_mapping(Direction::Write, values, fields, "", config, registry)
}

fn transform(
    direction: Direction,
    value: &Value,
    field: &Field,
    path: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Value, CodecError> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    let field = expand_component(field, config, path).map_err(|e| CodecError {
        path: path.to_string(),
        source: TransformError::Invalid(e.to_string()),
    })?;

    match value {
        Value::Sequence(items) if field.is_list() => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                transform_item(direction, item, &field, &format!("{}[{}]", path, i), config, registry)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        _ => transform_item(direction, value, &field, path, config, registry),
    }
}

fn transform_item(
    direction: Direction,
    value: &Value,
    field: &Field,
    path: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Value, CodecError> {
    if value.is_null() {
        return Ok(Value::Null);
    }

    if let Some(blocks) = &field.blocks {
        let Value::Mapping(map) = value else {
            return Ok(value.clone());
        };
        let tag = map.get(field.block_key()).and_then(scalar_text);
        let Some(variant) = blocks.iter().find(|b| Some(&b.name) == tag.as_ref()) else {
            return Ok(value.clone());
        };
        let variant = expand_component(variant, config, path).map_err(|e| CodecError {
            path: path.to_string(),
            source: TransformError::Invalid(e.to_string()),
        })?;
        let fields = variant.fields.as_deref().unwrap_or_default();
        return transform_mapping(direction, map, fields, path, config, registry)
            .map(Value::Mapping);
    }

    if let Some(fields) = &field.fields {
        return match value {
            Value::Mapping(map) => {
                transform_mapping(direction, map, fields, path, config, registry).map(Value::Mapping)
            }
            other => Ok(other.clone()),
        };
    }

    let type_name = field.effective_type();
    let transform = match direction {
        Direction::Read => registry.read_transform(type_name),
        Direction::Write => registry.write_transform(type_name),
    };
    match transform {
        Some(apply) => apply(value, field, config)
            .map_err(|source| CodecError { path: path.to_string(), source }),
        None => Ok(value.clone()),
    }
}

fn transform_mapping(
    direction: Direction,
    map: &Mapping,
    fields: &[Field],
    parent: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Mapping, CodecError> {
    let mut out = map.clone();
    for field in fields {
        if let Some(value) = map.get(field.name.as_str()) {
            let path = join_path(parent, &field.name);
            let converted = transform(direction, value, field, &path, config, registry)?;
            out.insert(Value::String(field.name.clone()), converted);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> std::sync::Arc<FieldRegistry> {
        FieldRegistry::builtin().unwrap()
    }

    fn config() -> CmsConfig {
        CmsConfig::from_yaml_str("media: { input: public/images, output: /images }").unwrap()
    }

    fn yaml<T: serde::de::DeserializeOwned>(s: &str) -> T {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_identity_without_transform() {
        let field = Field::new("title", "string");
        let value = Value::String("Hello".into());
        assert_eq!(read_value(&value, &field, &config(), &registry()).unwrap(), value);
        assert_eq!(write_value(&value, &field, &config(), &registry()).unwrap(), value);
    }

    #[test]
    fn test_null_passes_through() {
        let field: Field = yaml("{ name: published, type: date, options: { format: '%d/%m/%Y' } }");
        assert_eq!(read_value(&Value::Null, &field, &config(), &registry()).unwrap(), Value::Null);
        assert_eq!(write_value(&Value::Null, &field, &config(), &registry()).unwrap(), Value::Null);
    }

    #[test]
    fn test_nested_paths_in_errors() {
        let field: Field = yaml(
            r#"
            name: events
            type: object
            list: true
            fields:
              - { name: on, type: date }
            "#,
        );
        let value: Value = yaml("[{ on: 2024-01-01 }, { on: tomorrow }]");
        let err = read_value(&value, &field, &config(), &registry()).unwrap_err();
        assert_eq!(err.path, "events[1].on");
    }

    #[test]
    fn test_blocks_transform_selected_variant() {
        let field: Field = yaml(
            r#"
            name: body
            type: block
            list: true
            blocks:
              - name: hero
                fields:
                  - { name: image, type: image }
              - name: text
                fields:
                  - { name: image, type: string }
            "#,
        );
        let value: Value = yaml(
            "[{ _block: hero, image: /images/a.png }, { _block: text, image: /images/b.png }]",
        );
        let read = read_value(&value, &field, &config(), &registry()).unwrap();
        let expected: Value = yaml(
            "[{ _block: hero, image: public/images/a.png }, { _block: text, image: /images/b.png }]",
        );
        assert_eq!(read, expected);
    }

    #[test]
    fn test_read_entry_keeps_raw_value_on_failure() {
        let fields: Vec<Field> = yaml(
            r#"
            - { name: title }
            - { name: date, type: date }
            - { name: cover, type: image }
            "#,
        );
        let entry: Mapping = yaml("{ title: Hi, date: 'last week', cover: /images/c.jpg }");
        let decoded = read_entry(&entry, &fields, &config(), &registry());

        assert!(!decoded.is_clean());
        assert_eq!(decoded.failures.len(), 1);
        assert_eq!(decoded.failures[0].path, "date");
        assert!(decoded.failures[0].message.starts_with("could not parse value"));
        assert_eq!(decoded.values.get("date"), Some(&Value::String("last week".into())));
        assert_eq!(
            decoded.values.get("cover"),
            Some(&Value::String("public/images/c.jpg".into()))
        );
    }

    #[test]
    fn test_write_entry_coerces_and_fails_loudly() {
        let fields: Vec<Field> = yaml("- { name: count, type: number }\n- { name: date, type: date }");
        let written =
            write_entry(&yaml("{ count: '12', extra: x }"), &fields, &config(), &registry()).unwrap();
        assert_eq!(written.get("count"), Some(&Value::Number(12.into())));
        assert_eq!(written.get("extra"), Some(&Value::String("x".into())));

        let err = write_entry(&yaml("{ date: soon }"), &fields, &config(), &registry()).unwrap_err();
        assert_eq!(err.path, "date");
    }
}
