//! Boolean type.

use std::cmp::Ordering;

use serde_yaml::Value;

use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::TransformError;
use crate::types::schema::Field;
use crate::types::validation::Schema;

fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

fn write(value: &Value, _field: &Field, _config: &CmsConfig) -> Result<Value, TransformError> {
    Ok(as_bool(value).map(Value::Bool).unwrap_or_else(|| value.clone()))
}

/// `false` before `true`; anything else after both.
fn sort(a: &Value, b: &Value, _field: &Field) -> Ordering {
    match (as_bool(a), as_bool(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Boolean")
        .with_schema(|_, _| Ok(Schema::Boolean))
        .with_default(Value::Bool(false))
        .with_write(write)
        .with_sort(sort)
        .with_components("checkbox", "boolean-view")
}
