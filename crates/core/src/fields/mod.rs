//! Field modules: the bundle of behaviors registered for one field type.
//!
//! Every capability is optional. A module without a schema builder accepts
//! any value, one without a default generator has no default, and one
//! without read/write transforms stores values as edited.
//!
//! Core modules live in [`builtin`]; modules shipped for deployments to
//! extend or override them live in [`custom`].

pub mod builtin;
pub mod custom;

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_yaml::Value;

use crate::config::CmsConfig;
use crate::types::errors::{FieldError, TransformError};
use crate::types::schema::Field;
use crate::types::validation::Schema;

/// Builds the type-specific schema of a declaration.
pub type SchemaBuilder =
    Arc<dyn Fn(&Field, &CmsConfig) -> Result<Schema, FieldError> + Send + Sync>;

/// Generates a fresh default value on every call.
pub type DefaultGenerator = Arc<dyn Fn() -> Value + Send + Sync>;

/// Converts a value between its stored and edited representation.
pub type Transform =
    Arc<dyn Fn(&Value, &Field, &CmsConfig) -> Result<Value, TransformError> + Send + Sync>;

/// Three-way comparison of two present (non-null) values.
pub type SortFn = Arc<dyn Fn(&Value, &Value, &Field) -> Ordering + Send + Sync>;

/// Default value of a type: a literal, or a generator evaluated per call.
#[derive(Clone)]
pub enum DefaultValue {
    Static(Value),
    Generate(DefaultGenerator),
}

impl DefaultValue {
    pub fn produce(&self) -> Value {
        match self {
            Self::Static(value) => value.clone(),
            Self::Generate(generate) => generate(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Generate(_) => write!(f, "Generate(..)"),
        }
    }
}

/// Reference to a presentation component, resolved by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComponentRef(String);

impl ComponentRef {
    pub fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which capabilities a module supplies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub schema: bool,
    pub default_value: bool,
    pub read: bool,
    pub write: bool,
    pub sort: bool,
    pub edit: bool,
    pub view: bool,
}

/// The behaviors of one field type.
#[derive(Clone, Default)]
pub struct FieldModule {
    pub label: Option<String>,
    pub schema: Option<SchemaBuilder>,
    pub default_value: Option<DefaultValue>,
    pub read: Option<Transform>,
    pub write: Option<Transform>,
    pub sort: Option<SortFn>,
    pub edit_component: Option<ComponentRef>,
    pub view_component: Option<ComponentRef>,
}

impl FieldModule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_schema<F>(mut self, builder: F) -> Self
    where
        F: Fn(&Field, &CmsConfig) -> Result<Schema, FieldError> + Send + Sync + 'static,
    {
        self.schema = Some(Arc::new(builder));
        self
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(DefaultValue::Static(value));
        self
    }

    pub fn with_default_fn<F>(mut self, generate: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default_value = Some(DefaultValue::Generate(Arc::new(generate)));
        self
    }

    pub fn with_read<F>(mut self, read: F) -> Self
    where
        F: Fn(&Value, &Field, &CmsConfig) -> Result<Value, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.read = Some(Arc::new(read));
        self
    }

    pub fn with_write<F>(mut self, write: F) -> Self
    where
        F: Fn(&Value, &Field, &CmsConfig) -> Result<Value, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.write = Some(Arc::new(write));
        self
    }

    pub fn with_sort<F>(mut self, sort: F) -> Self
    where
        F: Fn(&Value, &Value, &Field) -> Ordering + Send + Sync + 'static,
    {
        self.sort = Some(Arc::new(sort));
        self
    }

    /// Set the edit and view components.
    pub fn with_components(mut self, edit: &str, view: &str) -> Self {
        self.edit_component = Some(ComponentRef::new(edit));
        self.view_component = Some(ComponentRef::new(view));
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            schema: self.schema.is_some(),
            default_value: self.default_value.is_some(),
            read: self.read.is_some(),
            write: self.write.is_some(),
            sort: self.sort.is_some(),
            edit: self.edit_component.is_some(),
            view: self.view_component.is_some(),
        }
    }
}

impl fmt::Debug for FieldModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldModule")
            .field("label", &self.label)
            .field("default_value", &self.default_value)
            .field("capabilities", &self.capabilities())
            .field("edit_component", &self.edit_component)
            .field("view_component", &self.view_component)
            .finish()
    }
}
