//! Field declarations, the type registry and everything resolved through it.
//!
//! A content entry is described by a list of [`Field`] declarations. The
//! [`FieldRegistry`] maps each declaration's type to its [`FieldModule`],
//! which the other parts of this module consult:
//!
//! - [`resolver`] turns declarations into [`Validator`]s
//! - [`defaults`] produces values for new entries
//! - [`codec`] converts between stored and edited values
//! - [`sort`] orders entries by a field
//!
//! # Example
//!
//! ```
//! use pagefields_core::config::CmsConfig;
//! use pagefields_core::types::{Field, FieldRegistry, resolve_validator};
//! use serde_yaml::Value;
//!
//! let registry = FieldRegistry::builtin().unwrap();
//! let field = Field::new("title", "string").with_option("maxlength", 5).required();
//! let validator = resolve_validator(&field, &CmsConfig::default(), &registry).unwrap();
//!
//! assert!(validator.validate(Some(&Value::String("hi".into()))).valid);
//! assert!(!validator.validate(Some(&Value::String("hello world".into()))).valid);
//! ```
//!
//! [`FieldModule`]: crate::fields::FieldModule

pub mod autofix;
pub mod codec;
pub mod defaults;
pub mod errors;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod sort;
pub mod validation;

// Re-export commonly used types
pub use autofix::{FixResult, try_fix_entry};
pub use codec::{DecodedEntry, FieldFailure, read_entry, read_value, write_entry, write_value};
pub use defaults::{default_value, entry_defaults};
pub use errors::{
    CodecError, FieldError, RegistryError, TransformError, ValidationError, ValidationResult,
};
pub use registry::{Capability, CapabilityRef, FieldRegistry, FieldRegistryBuilder, ModuleOrigin};
pub use resolver::{resolve_entry, resolve_fields, resolve_validator};
pub use schema::{Field, FieldLabel, FieldPattern, ListBounds, ListDefault, ListSpec};
pub use sort::{Comparator, SortOrder, compare_values, sort_comparator, sort_entries};
pub use validation::{Schema, Validator};
