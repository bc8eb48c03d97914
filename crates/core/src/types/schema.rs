//! Field declarations as they appear in the content configuration.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Discriminator key used by block fields when `blockKey` is not set.
pub const DEFAULT_BLOCK_KEY: &str = "_block";

/// Type used when a declaration omits `type`.
pub const DEFAULT_FIELD_TYPE: &str = "string";

/// Display label of a field.
///
/// `label: false` hides the label entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldLabel {
    Hidden(bool),
    Text(String),
}

/// Regex constraint on a string-like field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldPattern {
    /// Bare regex; failures use a generic message.
    Regex(String),
    /// Regex with the message shown when it does not match.
    Detailed {
        regex: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl FieldPattern {
    pub fn regex(&self) -> &str {
        match self {
            Self::Regex(re) => re,
            Self::Detailed { regex, .. } => regex,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Regex(_) => None,
            Self::Detailed { message, .. } => message.as_deref(),
        }
    }
}

/// Default contents of a repeating field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListDefault {
    /// Number of default items to generate.
    Count(usize),
    /// Literal items.
    Values(Vec<Value>),
}

/// Cardinality and presentation settings of a repeating field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ListDefault>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
}

/// `list: true` or `list: { min, max, ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListSpec {
    Flag(bool),
    Bounds(ListBounds),
}

/// Declaration of one content field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Identifier, unique among siblings.
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<FieldLabel>,

    /// Registry key. Defaults to `string`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,

    /// Type-specific options (`min`, `max`, `values`, `format`, ...).
    #[serde(default, skip_serializing_if = "Mapping::is_empty")]
    pub options: Mapping,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<ListSpec>,

    /// Nested declarations of an object field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,

    /// Variants of a block field; each variant's `name` is its tag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<Field>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_key: Option<String>,

    /// Name of a reusable declaration in `components`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub readonly: bool,
}

impl Field {
    /// Create a field with a name and a type.
    pub fn new(name: &str, field_type: &str) -> Self {
        Self {
            name: name.to_string(),
            field_type: Some(field_type.to_string()),
            ..Default::default()
        }
    }

    /// Get the effective field type, defaulting to `string` if not specified.
    pub fn effective_type(&self) -> &str {
        self.field_type.as_deref().unwrap_or(DEFAULT_FIELD_TYPE)
    }

    /// Label to show in the editor; `None` when the label is hidden.
    pub fn display_label(&self) -> Option<&str> {
        match &self.label {
            Some(FieldLabel::Text(text)) => Some(text),
            Some(FieldLabel::Hidden(false)) => None,
            _ => Some(&self.name),
        }
    }

    pub fn is_list(&self) -> bool {
        match &self.list {
            Some(ListSpec::Flag(flag)) => *flag,
            Some(ListSpec::Bounds(_)) => true,
            None => false,
        }
    }

    /// `(min, max)` item counts of a list field.
    pub fn list_bounds(&self) -> (Option<usize>, Option<usize>) {
        match &self.list {
            Some(ListSpec::Bounds(bounds)) => (bounds.min, bounds.max),
            _ => (None, None),
        }
    }

    pub fn list_default(&self) -> Option<&ListDefault> {
        match &self.list {
            Some(ListSpec::Bounds(bounds)) => bounds.default.as_ref(),
            _ => None,
        }
    }

    /// Discriminator key of a block field.
    pub fn block_key(&self) -> &str {
        self.block_key.as_deref().unwrap_or(DEFAULT_BLOCK_KEY)
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str)
    }

    pub fn option_f64(&self, key: &str) -> Option<f64> {
        self.option(key).and_then(Value::as_f64)
    }

    pub fn option_usize(&self, key: &str) -> Option<usize> {
        self.option(key).and_then(Value::as_u64).and_then(|n| usize::try_from(n).ok())
    }

    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.option(key).and_then(Value::as_bool)
    }

    /// Builder-style helper used mostly by tests and custom modules.
    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(Value::String(key.to_string()), value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults() {
        let field = Field::default();
        assert!(!field.required);
        assert!(field.field_type.is_none());
        assert_eq!(field.effective_type(), "string");
        assert!(!field.is_list());
        assert_eq!(field.block_key(), "_block");
    }

    #[test]
    fn test_field_deserialization() {
        let yaml = r#"
            name: title
            type: string
            required: true
            pattern:
              regex: "^[A-Z]"
              message: "must start with a capital letter"
            options:
              maxlength: 80
        "#;
        let field: Field = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(field.name, "title");
        assert!(field.required);
        assert_eq!(field.option_usize("maxlength"), Some(80));
        let pattern = field.pattern.unwrap();
        assert_eq!(pattern.regex(), "^[A-Z]");
        assert_eq!(pattern.message(), Some("must start with a capital letter"));
    }

    #[test]
    fn test_list_spec_forms() {
        let flag: Field = serde_yaml::from_str("name: tags\nlist: true").unwrap();
        assert!(flag.is_list());
        assert_eq!(flag.list_bounds(), (None, None));

        let off: Field = serde_yaml::from_str("name: tags\nlist: false").unwrap();
        assert!(!off.is_list());

        let bounded: Field =
            serde_yaml::from_str("name: tags\nlist: { min: 1, max: 3, default: 2 }").unwrap();
        assert!(bounded.is_list());
        assert_eq!(bounded.list_bounds(), (Some(1), Some(3)));
        assert_eq!(bounded.list_default(), Some(&ListDefault::Count(2)));
    }

    #[test]
    fn test_label_forms() {
        let hidden: Field = serde_yaml::from_str("name: body\nlabel: false").unwrap();
        assert_eq!(hidden.display_label(), None);

        let text: Field = serde_yaml::from_str("name: body\nlabel: Content").unwrap();
        assert_eq!(text.display_label(), Some("Content"));

        let none: Field = serde_yaml::from_str("name: body").unwrap();
        assert_eq!(none.display_label(), Some("body"));
    }

    #[test]
    fn test_block_key_and_nested_fields() {
        let yaml = r#"
            name: sections
            type: block
            blockKey: _type
            list: true
            blocks:
              - name: hero
                fields:
                  - { name: heading, type: string }
              - name: quote
                fields:
                  - { name: text, type: text }
        "#;
        let field: Field = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(field.block_key(), "_type");
        let blocks = field.blocks.unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].fields.as_ref().unwrap()[0].name, "heading");
    }
}
