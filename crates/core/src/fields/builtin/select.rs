//! Select type: one (or, with `multiple`, several) of a fixed set of values.

use serde_yaml::Value;

use super::compare_text;
use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::FieldError;
use crate::types::schema::Field;
use crate::types::validation::{Schema, SelectRules, scalar_text};

/// Allowed values of a select declaration.
///
/// `options.values` items are scalars or `{ value, label }` mappings.
pub fn select_values(field: &Field) -> Result<Vec<String>, FieldError> {
    let Some(values) = field.option("values") else {
        return Ok(Vec::new());
    };
    let Value::Sequence(items) = values else {
        return Err(FieldError::InvalidOption {
            path: field.name.clone(),
            option: "values".into(),
            message: "expected a list".into(),
        });
    };

    items
        .iter()
        .map(|item| {
            let value = match item {
                Value::Mapping(map) => map.get("value").and_then(scalar_text),
                other => scalar_text(other),
            };
            value.ok_or_else(|| FieldError::InvalidOption {
                path: field.name.clone(),
                option: "values".into(),
                message: "each value must be a scalar or have a 'value' key".into(),
            })
        })
        .collect()
}

fn schema(field: &Field, _config: &CmsConfig) -> Result<Schema, FieldError> {
    Ok(Schema::Select(SelectRules {
        values: select_values(field)?,
        multiple: field.option_bool("multiple").unwrap_or(false),
    }))
}

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Select")
        .with_schema(schema)
        .with_sort(|a, b, _| compare_text(a, b))
        .with_components("select", "text-view")
}
