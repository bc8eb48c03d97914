//! Resolved validators and value validation.
//!
//! A [`Validator`] mirrors the declaration tree it was resolved from. Checking
//! a value never stops at the first problem: every issue is collected into a
//! [`ValidationResult`] tagged with the path of the offending value.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_yaml::{Mapping, Value};

use super::errors::{ValidationError, ValidationResult};

/// Check supplied by a custom field type.
pub type CustomCheck = Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>;

/// Compiled `pattern` constraint.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub message: Option<String>,
}

/// Constraints of string-like types.
#[derive(Debug, Clone, Default)]
pub struct StringRules {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub patterns: Vec<CompiledPattern>,
}

/// Constraints of the number type.
#[derive(Debug, Clone, Default)]
pub struct NumberRules {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub integer: bool,
}

/// Storage and edit formats of the date type (chrono strftime syntax).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRules {
    pub format: String,
    pub edit_format: String,
}

impl DateRules {
    /// Parse a date string with the storage format, then the edit format.
    pub fn parse(&self, s: &str) -> Option<NaiveDateTime> {
        parse_datetime(s, &self.format).or_else(|| parse_datetime(s, &self.edit_format))
    }
}

/// Parse a date or datetime with a strftime format.
///
/// Date-only formats resolve to midnight.
pub fn parse_datetime(s: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, format).ok().or_else(|| {
        NaiveDate::parse_from_str(s, format).ok().and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

/// Allowed values of the select type.
#[derive(Debug, Clone, Default)]
pub struct SelectRules {
    pub values: Vec<String>,
    pub multiple: bool,
}

/// Constraints of media path types (image, file).
#[derive(Debug, Clone, Default)]
pub struct PathRules {
    /// Allowed lowercase extensions without the dot; empty allows any.
    pub extensions: Vec<String>,
    pub multiple: bool,
}

/// The type-specific part of a validator.
#[derive(Clone)]
pub enum Schema {
    /// Accepts any value; used for types without a schema builder.
    Any,
    String(StringRules),
    Number(NumberRules),
    Boolean,
    Uuid,
    Date(DateRules),
    Select(SelectRules),
    Path(PathRules),
    /// Mapping with one validator per declared key.
    Object(Vec<Validator>),
    /// Tagged union: exactly one variant selected by `key`.
    Union { key: String, variants: Vec<Validator> },
    /// Ordered sequence of items.
    List { item: Box<Validator>, min: Option<usize>, max: Option<usize> },
    /// Check supplied by a custom type, applied after `base`.
    Custom { base: Box<Schema>, check: CustomCheck },
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "Any"),
            Self::String(r) => f.debug_tuple("String").field(r).finish(),
            Self::Number(r) => f.debug_tuple("Number").field(r).finish(),
            Self::Boolean => write!(f, "Boolean"),
            Self::Uuid => write!(f, "Uuid"),
            Self::Date(r) => f.debug_tuple("Date").field(r).finish(),
            Self::Select(r) => f.debug_tuple("Select").field(r).finish(),
            Self::Path(r) => f.debug_tuple("Path").field(r).finish(),
            Self::Object(children) => f.debug_tuple("Object").field(children).finish(),
            Self::Union { key, variants } => f
                .debug_struct("Union")
                .field("key", key)
                .field("variants", variants)
                .finish(),
            Self::List { item, min, max } => f
                .debug_struct("List")
                .field("item", item)
                .field("min", min)
                .field("max", max)
                .finish(),
            Self::Custom { base, .. } => f.debug_struct("Custom").field("base", base).finish(),
        }
    }
}

/// A validator for one declared field (or a whole entry when `name` is empty).
#[derive(Debug, Clone)]
pub struct Validator {
    /// Key of the value inside its parent mapping.
    pub name: String,
    pub required: bool,
    pub schema: Schema,
}

impl Validator {
    pub fn new(name: &str, required: bool, schema: Schema) -> Self {
        Self { name: name.to_string(), required, schema }
    }

    /// Validate a value; `None` means the key is absent.
    pub fn validate(&self, value: Option<&Value>) -> ValidationResult {
        let mut result = ValidationResult::success();
        self.check(&self.name, value, &mut result);
        result
    }

    /// Validate the fields of an entry mapping against an object validator.
    pub fn validate_entry(&self, entry: &Mapping) -> ValidationResult {
        let mut result = ValidationResult::success();
        match &self.schema {
            Schema::Object(children) => {
                check_object(&self.name, children, entry, None, &mut result);
            }
            _ => self.check(&self.name, Some(&Value::Mapping(entry.clone())), &mut result),
        }
        result
    }

    /// Child validator by name, for object validators.
    pub fn child(&self, name: &str) -> Option<&Validator> {
        match &self.schema {
            Schema::Object(children) => children.iter().find(|c| c.name == name),
            _ => None,
        }
    }

    fn check(&self, path: &str, value: Option<&Value>, result: &mut ValidationResult) {
        let value = match value {
            Some(v) if !is_empty_sentinel(v) => v,
            _ => {
                if self.required {
                    result.add_error(ValidationError::MissingRequired {
                        path: path.to_string(),
                    });
                }
                return;
            }
        };

        if let (Schema::List { .. }, Value::Sequence(seq)) = (&self.schema, value)
            && seq.is_empty()
            && self.required
        {
            result.add_error(ValidationError::MissingRequired { path: path.to_string() });
            return;
        }

        check_schema(&self.schema, path, value, result);
    }
}

/// `null`, or the empty string left behind by a cleared form input.
pub fn is_empty_sentinel(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn check_schema(schema: &Schema, path: &str, value: &Value, result: &mut ValidationResult) {
    match schema {
        Schema::Any => {}
        Schema::String(rules) => check_string(rules, path, value, result),
        Schema::Number(rules) => check_number(rules, path, value, result),
        Schema::Boolean => match value {
            Value::Bool(_) => {}
            Value::String(s) if s == "true" || s == "false" => {}
            other => result.add_error(mismatch(path, "boolean", other)),
        },
        Schema::Uuid => match value {
            Value::String(s) if uuid::Uuid::try_parse(s).is_ok() => {}
            Value::String(s) => result.add_error(ValidationError::InvalidValue {
                path: path.to_string(),
                message: format!("'{}' is not a valid UUID", s),
            }),
            other => result.add_error(mismatch(path, "uuid", other)),
        },
        Schema::Date(rules) => match scalar_text(value) {
            Some(s) if rules.parse(&s).is_some() => {}
            Some(s) => result.add_error(ValidationError::InvalidValue {
                path: path.to_string(),
                message: format!("'{}' is not a valid date (format '{}')", s, rules.format),
            }),
            None => result.add_error(mismatch(path, "date", value)),
        },
        Schema::Select(rules) => check_select(rules, path, value, result),
        Schema::Path(rules) => check_path(rules, path, value, result),
        Schema::Object(children) => match value {
            Value::Mapping(map) => check_object(path, children, map, None, result),
            other => result.add_error(mismatch(path, "object", other)),
        },
        Schema::Union { key, variants } => check_union(key, variants, path, value, result),
        Schema::List { item, min, max } => {
            let Value::Sequence(seq) = value else {
                result.add_error(mismatch(path, "list", value));
                return;
            };
            if let Some(min) = min
                && seq.len() < *min
            {
                result.add_error(ValidationError::ListLength {
                    path: path.to_string(),
                    len: seq.len(),
                    message: format!("list has {} items, minimum is {}", seq.len(), min),
                });
            }
            if let Some(max) = max
                && seq.len() > *max
            {
                result.add_error(ValidationError::ListLength {
                    path: path.to_string(),
                    len: seq.len(),
                    message: format!("list has {} items, maximum is {}", seq.len(), max),
                });
            }
            for (i, entry) in seq.iter().enumerate() {
                item.check(&format!("{}[{}]", path, i), Some(entry), result);
            }
        }
        Schema::Custom { base, check } => {
            let before = result.errors.len();
            check_schema(base, path, value, result);
            if result.errors.len() == before
                && let Err(message) = check(value)
            {
                result.add_error(ValidationError::Custom { path: path.to_string(), message });
            }
        }
    }
}

fn check_string(rules: &StringRules, path: &str, value: &Value, result: &mut ValidationResult) {
    let Value::String(s) = value else {
        result.add_error(mismatch(path, "string", value));
        return;
    };

    let len = s.chars().count();
    if let Some(min) = rules.min_length
        && len < min
    {
        result.add_error(ValidationError::InvalidValue {
            path: path.to_string(),
            message: format!("must be at least {} characters (got {})", min, len),
        });
    }
    if let Some(max) = rules.max_length
        && len > max
    {
        result.add_error(ValidationError::InvalidValue {
            path: path.to_string(),
            message: format!("must be at most {} characters (got {})", max, len),
        });
    }
    for pattern in &rules.patterns {
        if !pattern.regex.is_match(s) {
            let message = pattern.message.clone().unwrap_or_else(|| {
                format!("value '{}' does not match pattern '{}'", s, pattern.regex.as_str())
            });
            result.add_error(ValidationError::PatternMismatch { path: path.to_string(), message });
        }
    }
}

fn check_number(rules: &NumberRules, path: &str, value: &Value, result: &mut ValidationResult) {
    let Some(f) = number_value(value) else {
        result.add_error(mismatch(path, "number", value));
        return;
    };

    if let Some(min) = rules.min
        && f < min
    {
        result.add_error(ValidationError::InvalidValue {
            path: path.to_string(),
            message: format!("value {} is less than minimum {}", f, min),
        });
    }
    if let Some(max) = rules.max
        && f > max
    {
        result.add_error(ValidationError::InvalidValue {
            path: path.to_string(),
            message: format!("value {} is greater than maximum {}", f, max),
        });
    }
    if rules.integer && f.fract() != 0.0 {
        result.add_error(ValidationError::InvalidValue {
            path: path.to_string(),
            message: format!("value {} must be an integer", f),
        });
    }
}

fn check_select(rules: &SelectRules, path: &str, value: &Value, result: &mut ValidationResult) {
    let check_one = |item_path: &str, item: &Value, result: &mut ValidationResult| {
        let Some(s) = scalar_text(item) else {
            result.add_error(mismatch(item_path, "string", item));
            return;
        };
        if !rules.values.is_empty() && !rules.values.contains(&s) {
            result.add_error(ValidationError::EnumViolation {
                path: item_path.to_string(),
                value: s,
                allowed: rules.values.clone(),
            });
        }
    };

    match (rules.multiple, value) {
        (true, Value::Sequence(seq)) => {
            for (i, item) in seq.iter().enumerate() {
                check_one(&format!("{}[{}]", path, i), item, result);
            }
        }
        (true, other) => result.add_error(mismatch(path, "list", other)),
        (false, other) => check_one(path, other, result),
    }
}

fn check_path(rules: &PathRules, path: &str, value: &Value, result: &mut ValidationResult) {
    let check_one = |item_path: &str, item: &Value, result: &mut ValidationResult| {
        let Value::String(s) = item else {
            result.add_error(mismatch(item_path, "path", item));
            return;
        };
        if rules.extensions.is_empty() {
            return;
        }
        let ext = s.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).unwrap_or_default();
        if !rules.extensions.contains(&ext) {
            result.add_error(ValidationError::InvalidValue {
                path: item_path.to_string(),
                message: format!(
                    "'{}' has an unsupported extension (allowed: {})",
                    s,
                    rules.extensions.join(", ")
                ),
            });
        }
    };

    match (rules.multiple, value) {
        (true, Value::Sequence(seq)) => {
            for (i, item) in seq.iter().enumerate() {
                check_one(&format!("{}[{}]", path, i), item, result);
            }
        }
        (_, other) => check_one(path, other, result),
    }
}

fn check_object(
    path: &str,
    children: &[Validator],
    map: &Mapping,
    discriminator: Option<&str>,
    result: &mut ValidationResult,
) {
    for child in children {
        let child_path = join_path(path, &child.name);
        child.check(&child_path, map.get(child.name.as_str()), result);
    }

    for key in map.keys() {
        let Some(key) = key.as_str() else {
            continue;
        };
        if Some(key) == discriminator || children.iter().any(|c| c.name == key) {
            continue;
        }
        result.add_warning(format!("{}: undeclared key", join_path(path, key)));
    }
}

fn check_union(
    key: &str,
    variants: &[Validator],
    path: &str,
    value: &Value,
    result: &mut ValidationResult,
) {
    let Value::Mapping(map) = value else {
        result.add_error(mismatch(path, "block", value));
        return;
    };

    let Some(tag) = map.get(key).and_then(scalar_text) else {
        result.add_error(ValidationError::MissingDiscriminator {
            path: path.to_string(),
            key: key.to_string(),
        });
        return;
    };

    let Some(variant) = variants.iter().find(|v| v.name == tag) else {
        result.add_error(ValidationError::UnknownVariant {
            path: path.to_string(),
            key: key.to_string(),
            value: tag,
            allowed: variants.iter().map(|v| v.name.clone()).collect(),
        });
        return;
    };

    match &variant.schema {
        Schema::Object(children) => check_object(path, children, map, Some(key), result),
        other => check_schema(other, path, value, result),
    }
}

/// Join a parent path and a child key (`""` + `title` = `title`).
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Numeric value of a number or a numeric string (form inputs submit strings).
pub fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Text of a scalar value; `None` for null, sequences and mappings.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        _ => None,
    }
}

/// Get a human-readable type name for a YAML value.
pub fn yaml_type_name(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Sequence(_) => "list".to_string(),
        Value::Mapping(_) => "mapping".to_string(),
        Value::Tagged(_) => "tagged".to_string(),
    }
}

fn mismatch(path: &str, expected: &str, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected: expected.to_string(),
        actual: yaml_type_name(value),
    }
}
