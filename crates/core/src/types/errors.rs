//! Error types for field resolution, registry construction, transforms and validation.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while turning field declarations into validators or
/// looking up field type capabilities.
///
/// These are configuration errors: the editor shows them once for the whole
/// schema instead of inline next to a field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The declaration names a type that is not registered.
    #[error("unknown field type '{type_name}' for field '{path}'")]
    UnknownFieldType { path: String, type_name: String },

    /// The declaration references a component that the configuration does not define.
    #[error("unknown component '{component}' referenced by field '{path}'")]
    UnknownComponent { path: String, component: String },

    /// Components reference each other in a loop.
    #[error("component cycle at field '{path}': {}", chain.join(" -> "))]
    ComponentCycle { path: String, chain: Vec<String> },

    /// Two sibling declarations share a name.
    #[error("duplicate field name '{name}' in '{parent}'")]
    DuplicateField { parent: String, name: String },

    /// The `pattern` of a declaration is not a valid regular expression.
    #[error("invalid pattern for field '{path}': {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// A type-specific option has an unusable value.
    #[error("invalid option '{option}' for field '{path}': {message}")]
    InvalidOption { path: String, option: String, message: String },

    /// No content entry with that name exists in the configuration.
    #[error("unknown content entry: {0}")]
    UnknownEntry(String),
}

impl FieldError {
    /// Re-anchor the error at a full field path.
    ///
    /// Schema builders only know the field's own name; the resolver knows
    /// where the field sits in the tree.
    pub fn at(self, full_path: &str) -> Self {
        let path = full_path.to_string();
        match self {
            Self::UnknownFieldType { type_name, .. } => {
                Self::UnknownFieldType { path, type_name }
            }
            Self::UnknownComponent { component, .. } => {
                Self::UnknownComponent { path, component }
            }
            Self::ComponentCycle { chain, .. } => Self::ComponentCycle { path, chain },
            Self::InvalidPattern { source, .. } => Self::InvalidPattern { path, source },
            Self::InvalidOption { option, message, .. } => {
                Self::InvalidOption { path, option, message }
            }
            other => other,
        }
    }
}

/// Errors raised while building the field registry.
///
/// Registry construction happens once at startup, so these are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A module was registered under an empty name.
    #[error("field type name must not be empty")]
    EmptyTypeName,

    /// A module was registered under a name with unsupported characters.
    #[error("invalid field type name '{0}': use lowercase letters, digits, '-' or '_'")]
    InvalidTypeName(String),
}

/// Errors returned by a field type's read or write transform.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// A date string does not match the expected format.
    #[error("'{value}' does not match date format '{format}'")]
    InvalidDate { value: String, format: String },

    /// The stored value has a shape the transform cannot handle.
    #[error("expected {expected}, got {actual}")]
    UnexpectedShape { expected: String, actual: String },

    /// Any other transform failure.
    #[error("{0}")]
    Invalid(String),
}

/// A transform failure anchored at a field path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("could not parse value of field '{path}': {source}")]
pub struct CodecError {
    pub path: String,
    #[source]
    pub source: TransformError,
}

/// A single validation problem, tagged with the path of the offending value.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{path}: field is required")]
    MissingRequired { path: String },

    /// Field value has wrong type.
    #[error("{path}: expected {expected}, got {actual}")]
    TypeMismatch { path: String, expected: String, actual: String },

    /// Field value is invalid.
    #[error("{path}: {message}")]
    InvalidValue { path: String, message: String },

    /// Enum constraint violated.
    #[error("{path}: '{value}' is not one of {allowed:?}")]
    EnumViolation { path: String, value: String, allowed: Vec<String> },

    /// A string did not match the declared pattern.
    #[error("{path}: {message}")]
    PatternMismatch { path: String, message: String },

    /// A block value is tagged with a variant that is not declared.
    #[error("{path}: unknown variant '{value}' for '{key}' (expected one of {allowed:?})")]
    UnknownVariant { path: String, key: String, value: String, allowed: Vec<String> },

    /// A block value carries no discriminator.
    #[error("{path}: missing block discriminator '{key}'")]
    MissingDiscriminator { path: String, key: String },

    /// A list has too few or too many items.
    #[error("{path}: {message}")]
    ListLength { path: String, len: usize, message: String },

    /// A custom field type rejected the value.
    #[error("{path}: {message}")]
    Custom { path: String, message: String },
}

impl ValidationError {
    /// Path of the value this error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingRequired { path }
            | Self::TypeMismatch { path, .. }
            | Self::InvalidValue { path, .. }
            | Self::EnumViolation { path, .. }
            | Self::PatternMismatch { path, .. }
            | Self::UnknownVariant { path, .. }
            | Self::MissingDiscriminator { path, .. }
            | Self::ListLength { path, .. }
            | Self::Custom { path, .. } => path,
        }
    }
}

/// Result of validating a value against a resolved validator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// Whether the value is valid.
    pub valid: bool,
    /// Validation errors (empty if valid).
    pub errors: Vec<ValidationError>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result.
    pub fn success() -> Self {
        Self { valid: true, errors: vec![], warnings: vec![] }
    }

    /// Create a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self { valid: false, errors, warnings: vec![] }
    }

    /// Add an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.valid = false;
    }

    /// Add a warning to the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Merge another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        if !other.valid {
            self.valid = false;
        }
    }

    /// Errors reported for one path.
    pub fn errors_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.path() == path)
    }
}
