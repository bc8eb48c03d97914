//! Default values for new entries.

use serde_yaml::{Mapping, Value};

use super::errors::FieldError;
use super::registry::FieldRegistry;
use super::resolver::expand_component;
use super::schema::{Field, ListDefault};
use crate::config::CmsConfig;

/// Default value of a declaration.
///
/// An explicit `default` wins, then the nested defaults of an object, then
/// the type's own default. List fields always get a sequence.
pub fn default_value(
    field: &Field,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Option<Value>, FieldError> {
    let field = expand_component(field, config, &field.name)?;
    if field.is_list() {
        return list_default(&field, config, registry).map(Some);
    }
    item_default(&field, field.default.as_ref(), config, registry)
}

/// Defaults for every declaration of a new entry; fields without a default
/// are left out.
pub fn entry_defaults(
    fields: &[Field],
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Mapping, FieldError> {
    let mut values = Mapping::new();
    for field in fields {
        if let Some(value) = default_value(field, config, registry)? {
            values.insert(Value::String(field.name.clone()), value);
        }
    }
    Ok(values)
}

fn item_default(
    field: &Field,
    explicit: Option<&Value>,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Option<Value>, FieldError> {
    if let Some(value) = explicit {
        return Ok(Some(value.clone()));
    }
    if let Some(fields) = &field.fields {
        return entry_defaults(fields, config, registry).map(|m| Some(Value::Mapping(m)));
    }
    if field.blocks.is_some() {
        return Ok(None);
    }
    Ok(registry.type_default(field.effective_type()))
}

fn list_default(
    field: &Field,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Value, FieldError> {
    match field.list_default() {
        Some(ListDefault::Count(count)) => {
            // A sequence `default` describes the whole list, not one item.
            let explicit = field.default.as_ref().filter(|v| !v.is_sequence());
            let items = (0..*count)
                .map(|_| {
                    item_default(field, explicit, config, registry)
                        .map(|item| item.unwrap_or(Value::Null))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Sequence(items))
        }
        Some(ListDefault::Values(values)) => Ok(Value::Sequence(values.clone())),
        None => match &field.default {
            Some(Value::Sequence(items)) => Ok(Value::Sequence(items.clone())),
            _ => Ok(Value::Sequence(Vec::new())),
        },
    }
}
