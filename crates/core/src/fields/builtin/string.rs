//! String-like types: string, text, rich-text, code.
//!
//! They share one schema builder; only labels and components differ.

use regex::Regex;

use super::compare_text;
use crate::config::CmsConfig;
use crate::fields::FieldModule;
use crate::types::errors::FieldError;
use crate::types::schema::Field;
use crate::types::validation::{CompiledPattern, Schema, StringRules};

/// Length and pattern constraints of a string-like declaration.
///
/// Reads `minlength`/`maxlength` options and the declaration's `pattern`.
pub fn string_rules(field: &Field) -> Result<StringRules, FieldError> {
    let min_length = field.option_usize("minlength");
    let max_length = field.option_usize("maxlength");
    if let (Some(min), Some(max)) = (min_length, max_length)
        && min > max
    {
        return Err(FieldError::InvalidOption {
            path: field.name.clone(),
            option: "minlength".into(),
            message: format!("minlength {} is greater than maxlength {}", min, max),
        });
    }

    let mut patterns = Vec::new();
    if let Some(pattern) = &field.pattern {
        let regex = Regex::new(pattern.regex()).map_err(|source| FieldError::InvalidPattern {
            path: field.name.clone(),
            source,
        })?;
        patterns.push(CompiledPattern { regex, message: pattern.message().map(str::to_string) });
    }

    Ok(StringRules { min_length, max_length, patterns })
}

fn string_schema(field: &Field, _config: &CmsConfig) -> Result<Schema, FieldError> {
    Ok(Schema::String(string_rules(field)?))
}

fn base(label: &str, edit: &str, view: &str) -> FieldModule {
    FieldModule::new()
        .with_label(label)
        .with_schema(string_schema)
        .with_sort(|a, b, _| compare_text(a, b))
        .with_components(edit, view)
}

pub fn module() -> FieldModule {
    base("String", "string-input", "text-view")
}

pub fn text_module() -> FieldModule {
    base("Text", "textarea", "text-view")
}

pub fn rich_text_module() -> FieldModule {
    base("Rich text", "rich-text-editor", "html-view")
}

pub fn code_module() -> FieldModule {
    base("Code", "code-editor", "code-view")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::schema::FieldPattern;

    #[test]
    fn test_rules_from_options() {
        let field = Field::new("title", "string").with_option("minlength", 2).with_option("maxlength", 5);
        let rules = string_rules(&field).unwrap();
        assert_eq!(rules.min_length, Some(2));
        assert_eq!(rules.max_length, Some(5));
        assert!(rules.patterns.is_empty());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let field = Field::new("title", "string").with_option("minlength", 9).with_option("maxlength", 5);
        assert!(matches!(string_rules(&field), Err(FieldError::InvalidOption { .. })));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let mut field = Field::new("slug", "string");
        field.pattern = Some(FieldPattern::Regex("([a-z".into()));
        assert!(matches!(string_rules(&field), Err(FieldError::InvalidPattern { .. })));
    }
}
