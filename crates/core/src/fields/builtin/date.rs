//! Date type.
//!
//! Stored values use the declaration's `format` option (chrono strftime
//! syntax). The editor works with `%Y-%m-%d`, or `%Y-%m-%dT%H:%M` when the
//! `time` option is set; a storage format with seconds or fractions of a
//! second widens the edit format to keep them. When `format` is omitted the
//! storage format equals the edit format.

use std::cmp::Ordering;
use std::fmt::Write;

use chrono::NaiveDateTime;
use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use serde_yaml::Value;

use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::{FieldError, TransformError};
use crate::types::schema::Field;
use crate::types::validation::{DateRules, Schema, parse_datetime, scalar_text, yaml_type_name};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MINUTE_FORMAT: &str = "%Y-%m-%dT%H:%M";
const SECOND_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FRACTION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Finest time unit a format carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precision {
    Day,
    Minute,
    Second,
    Fraction,
}

impl Precision {
    fn of(format: &str) -> Self {
        StrftimeItems::new(format)
            .map(|item| match item {
                Item::Numeric(Numeric::Hour | Numeric::Hour12 | Numeric::Minute, _) => {
                    Self::Minute
                }
                Item::Numeric(Numeric::Second | Numeric::Timestamp, _)
                | Item::Fixed(Fixed::RFC2822) => Self::Second,
                Item::Numeric(Numeric::Nanosecond, _)
                | Item::Fixed(
                    Fixed::Nanosecond
                    | Fixed::Nanosecond3
                    | Fixed::Nanosecond6
                    | Fixed::Nanosecond9
                    | Fixed::RFC3339
                    | Fixed::Internal(_),
                ) => Self::Fraction,
                _ => Self::Day,
            })
            .max()
            .unwrap_or(Self::Day)
    }

    fn edit_format(self) -> &'static str {
        match self {
            Self::Day => DATE_FORMAT,
            Self::Minute => MINUTE_FORMAT,
            Self::Second => SECOND_FORMAT,
            Self::Fraction => FRACTION_FORMAT,
        }
    }
}

fn requested_precision(field: &Field) -> Precision {
    if field.option_bool("time").unwrap_or(false) { Precision::Minute } else { Precision::Day }
}

/// Storage format as declared, without checking it.
fn storage_format(field: &Field) -> &str {
    field.option_str("format").unwrap_or_else(|| requested_precision(field).edit_format())
}

/// Storage and edit formats of a date declaration.
pub fn date_rules(field: &Field) -> Result<DateRules, FieldError> {
    let format = storage_format(field);

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(FieldError::InvalidOption {
            path: field.name.clone(),
            option: "format".into(),
            message: format!("'{}' is not a valid date format", format),
        });
    }

    let precision = requested_precision(field).max(Precision::of(format));
    Ok(DateRules { format: format.to_string(), edit_format: precision.edit_format().to_string() })
}

/// Parse a stored or edited date value; `None` if it is not a date.
pub fn parse_date_value(value: &Value, rules: &DateRules) -> Option<NaiveDateTime> {
    scalar_text(value).and_then(|s| rules.parse(&s))
}

fn format_datetime(dt: &NaiveDateTime, format: &str) -> Result<String, TransformError> {
    let mut out = String::new();
    write!(out, "{}", dt.format(format))
        .map_err(|_| TransformError::Invalid(format!("cannot format date with '{}'", format)))?;
    Ok(out)
}

fn rules_for(field: &Field) -> Result<DateRules, TransformError> {
    date_rules(field).map_err(|e| TransformError::Invalid(e.to_string()))
}

/// Convert `from` format to `to` format, trying `fallback` when `from` fails.
fn convert(value: &Value, from: &str, fallback: &str, to: &str) -> Result<Value, TransformError> {
    let Some(s) = scalar_text(value) else {
        return Err(TransformError::UnexpectedShape {
            expected: "date".into(),
            actual: yaml_type_name(value),
        });
    };
    if s.is_empty() {
        return Ok(value.clone());
    }
    let dt = parse_datetime(&s, from)
        .or_else(|| parse_datetime(&s, fallback))
        .ok_or_else(|| TransformError::InvalidDate { value: s.clone(), format: from.to_string() })?;
    Ok(Value::String(format_datetime(&dt, to)?))
}

fn read(value: &Value, field: &Field, _config: &CmsConfig) -> Result<Value, TransformError> {
    let rules = rules_for(field)?;
    convert(value, &rules.format, &rules.format, &rules.edit_format)
}

fn write(value: &Value, field: &Field, _config: &CmsConfig) -> Result<Value, TransformError> {
    let rules = rules_for(field)?;
    convert(value, &rules.edit_format, &rules.format, &rules.format)
}

/// Chronological order; values that are not dates sort last.
///
/// Values are parsed with the declared storage format first; the edit format
/// is only worked out for values that do not match it.
fn sort(a: &Value, b: &Value, field: &Field) -> Ordering {
    let format = storage_format(field);
    let parse = |v: &Value| {
        let text = scalar_text(v)?;
        parse_datetime(&text, format).or_else(|| {
            let rules = date_rules(field).ok()?;
            parse_datetime(&text, &rules.edit_format)
        })
    };
    match (parse(a), parse(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Date")
        .with_schema(|field, _| Ok(Schema::Date(date_rules(field)?)))
        .with_read(read)
        .with_write(write)
        .with_sort(sort)
        .with_components("date-picker", "date-view")
}
