//! Number type.

use std::cmp::Ordering;

use serde_yaml::Value;

use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::{FieldError, TransformError};
use crate::types::schema::Field;
use crate::types::validation::{NumberRules, Schema, number_value, yaml_type_name};

fn schema(field: &Field, _config: &CmsConfig) -> Result<Schema, FieldError> {
    let min = field.option_f64("min");
    let max = field.option_f64("max");
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(FieldError::InvalidOption {
            path: field.name.clone(),
            option: "min".into(),
            message: format!("min {} is greater than max {}", min, max),
        });
    }
    Ok(Schema::Number(NumberRules {
        min,
        max,
        integer: field.option_bool("integer").unwrap_or(false),
    }))
}

/// Store numeric form input as a YAML number; a cleared input becomes null.
fn write(value: &Value, _field: &Field, _config: &CmsConfig) -> Result<Value, TransformError> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(s) if s.trim().is_empty() => Ok(Value::Null),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::Number(i.into()));
            }
            match s.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(Value::Number(f.into())),
                _ => Err(TransformError::Invalid(format!("'{}' is not a number", s))),
            }
        }
        other => Err(TransformError::UnexpectedShape {
            expected: "number".into(),
            actual: yaml_type_name(other),
        }),
    }
}

/// Numeric order; values that do not parse sort after numbers.
fn sort(a: &Value, b: &Value, _field: &Field) -> Ordering {
    match (number_value(a), number_value(b)) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Number")
        .with_schema(schema)
        .with_write(write)
        .with_sort(sort)
        .with_components("number-input", "number-view")
}
