//! Mechanical repairs for validation issues.
//!
//! Two kinds of issue are fixed:
//! - a missing required top-level field that has a default gets it
//! - a select value that matches an allowed value except for case is
//!   replaced by the allowed spelling

use serde_yaml::{Mapping, Value};

use super::defaults::default_value;
use super::errors::{FieldError, ValidationError};
use super::registry::FieldRegistry;
use super::resolver::expand_component;
use super::schema::Field;
use super::validation::is_empty_sentinel;
use crate::config::CmsConfig;

/// Result of attempting to fix an entry.
#[derive(Debug)]
pub struct FixResult {
    /// Whether any fixes were applied.
    pub fixed: bool,
    /// Description of fixes applied.
    pub fixes: Vec<String>,
    /// The entry with fixes applied.
    pub values: Mapping,
}

/// Attempt to fix the validation errors reported for an entry.
pub fn try_fix_entry(
    entry: &Mapping,
    fields: &[Field],
    errors: &[ValidationError],
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<FixResult, FieldError> {
    let mut values = entry.clone();
    let mut fixes = Vec::new();

    for error in errors {
        let fix = match error {
            ValidationError::MissingRequired { path } => {
                fix_missing_required(path, fields, &mut values, config, registry)?
            }
            ValidationError::EnumViolation { path, value, allowed } => {
                fix_enum_case(path, value, allowed, &mut values)
            }
            _ => None,
        };
        fixes.extend(fix);
    }

    Ok(FixResult { fixed: !fixes.is_empty(), fixes, values })
}

/// Fix a missing required field by adding its default value.
fn fix_missing_required(
    path: &str,
    fields: &[Field],
    values: &mut Mapping,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Option<String>, FieldError> {
    let Some(field) = fields.iter().find(|f| f.name == path) else {
        return Ok(None);
    };
    let field = expand_component(field, config, path)?;
    let Some(default) = default_value(&field, config, registry)? else {
        return Ok(None);
    };
    if is_empty_sentinel(&default) || matches!(&default, Value::Sequence(s) if s.is_empty()) {
        return Ok(None);
    }

    let shown = display(&default);
    values.insert(Value::String(path.to_string()), default);
    Ok(Some(format!("Added missing field '{}' with default '{}'", path, shown)))
}

/// Fix enum case mismatch by normalizing to the correct case.
///
/// Handles top-level values (`status`) and items of top-level lists (`tags[2]`).
fn fix_enum_case(
    path: &str,
    value: &str,
    allowed: &[String],
    values: &mut Mapping,
) -> Option<String> {
    let lowercase_value = value.to_lowercase();
    let correct_value = allowed.iter().find(|v| v.to_lowercase() == lowercase_value)?;
    if correct_value == value {
        return None;
    }

    let slot = match split_index(path) {
        Some((key, index)) => match values.get_mut(key)? {
            Value::Sequence(items) => items.get_mut(index)?,
            _ => return None,
        },
        None if !path.contains('.') => values.get_mut(path)?,
        None => return None,
    };
    *slot = Value::String(correct_value.clone());

    Some(format!("Fixed case for '{}': '{}' -> '{}'", path, value, correct_value))
}

/// `tags[2]` -> `("tags", 2)`.
fn split_index(path: &str) -> Option<(&str, usize)> {
    let (key, rest) = path.split_once('[')?;
    let index = rest.strip_suffix(']')?.parse().ok()?;
    if key.contains('.') {
        return None;
    }
    Some((key, index))
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => serde_yaml::to_string(other).map(|s| s.trim_end().to_string()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::resolver::resolve_fields;

    fn fields() -> Vec<Field> {
        serde_yaml::from_str(
            r#"
            - { name: title, required: true }
            - name: status
              type: select
              required: true
              default: open
              options: { values: [open, done] }
            - name: tags
              type: select
              options: { values: [Rust, Go], multiple: true }
            - { name: draft, type: boolean, required: true }
            "#,
        )
        .unwrap()
    }

    fn fix(yaml: &str) -> FixResult {
        let registry = FieldRegistry::builtin().unwrap();
        let config = CmsConfig::default();
        let fields = fields();
        let entry: Mapping = serde_yaml::from_str(yaml).unwrap();
        let validator = resolve_fields(&fields, &config, &registry).unwrap();
        let errors = validator.validate_entry(&entry).errors;
        try_fix_entry(&entry, &fields, &errors, &config, &registry).unwrap()
    }

    #[test]
    fn test_fix_missing_required_with_default() {
        let result = fix("{ title: Hello }");
        assert!(result.fixed);
        assert_eq!(result.fixes.len(), 2);
        assert_eq!(result.values.get("status"), Some(&Value::String("open".into())));
        assert_eq!(result.values.get("draft"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_no_fix_without_default() {
        let result = fix("{ status: open, draft: true }");
        assert!(!result.fixed);
        assert!(result.values.get("title").is_none());
    }

    #[test]
    fn test_fix_enum_case() {
        let result = fix("{ title: T, status: OPEN, draft: false, tags: [rust, Go] }");
        assert!(result.fixed);
        assert_eq!(result.values.get("status"), Some(&Value::String("open".into())));
        let tags: Value = serde_yaml::from_str("[Rust, Go]").unwrap();
        assert_eq!(result.values.get("tags"), Some(&tags));
        assert!(result.fixes.iter().any(|f| f.contains("tags[0]")));
    }

    #[test]
    fn test_split_index() {
        assert_eq!(split_index("tags[3]"), Some(("tags", 3)));
        assert_eq!(split_index("tags"), None);
        assert_eq!(split_index("a.b[1]"), None);
    }
}
