//! Color type: CSS hex colors, stored lowercase.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_yaml::Value;

use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::fields::builtin::{compare_text, string_rules};
use crate::types::errors::{FieldError, TransformError};
use crate::types::schema::Field;
use crate::types::validation::{CustomCheck, Schema};

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

fn schema(field: &Field, _config: &CmsConfig) -> Result<Schema, FieldError> {
    let check: CustomCheck = Arc::new(|value: &Value| match value.as_str() {
        Some(s) if HEX_COLOR.is_match(s) => Ok(()),
        Some(s) => Err(format!("'{}' is not a hex color (#rgb or #rrggbb)", s)),
        None => Err("expected a hex color string".to_string()),
    });
    Ok(Schema::Custom { base: Box::new(Schema::String(string_rules(field)?)), check })
}

fn write(value: &Value, _field: &Field, _config: &CmsConfig) -> Result<Value, TransformError> {
    Ok(match value {
        Value::String(s) => Value::String(s.trim().to_lowercase()),
        other => other.clone(),
    })
}

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Color")
        .with_schema(schema)
        .with_write(write)
        .with_sort(|a, b, _| compare_text(a, b))
        .with_components("color-picker", "color-swatch")
}
