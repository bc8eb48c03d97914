//! Field type registry.
//!
//! The registry is an immutable snapshot: it is assembled once by a
//! [`FieldRegistryBuilder`] and then shared by reference. Core modules are
//! registered first and custom modules afterwards; the last registration of
//! a name wins, so a custom module can replace a core one.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use serde_yaml::Value;

use super::errors::{FieldError, RegistryError};
use crate::fields::{
    Capabilities, ComponentRef, DefaultValue, FieldModule, SchemaBuilder, SortFn, Transform,
    builtin, custom,
};

/// Where a registered module came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleOrigin {
    Core,
    Custom,
}

impl std::fmt::Display for ModuleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, Clone)]
struct Registered {
    origin: ModuleOrigin,
    module: Arc<FieldModule>,
}

/// Collects modules before freezing them into a [`FieldRegistry`].
#[derive(Debug, Default)]
pub struct FieldRegistryBuilder {
    modules: BTreeMap<String, Registered>,
}

impl FieldRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under a type name, replacing any earlier one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        origin: ModuleOrigin,
        module: FieldModule,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        validate_type_name(&name)?;

        let registered = Registered { origin, module: Arc::new(module) };
        if let Some(previous) = self.modules.insert(name.clone(), registered) {
            tracing::debug!(
                type_name = %name,
                previous = %previous.origin,
                replacement = %origin,
                "field type overridden"
            );
        }
        Ok(())
    }

    /// Register the core modules.
    pub fn with_core(mut self) -> Result<Self, RegistryError> {
        for (name, module) in builtin::modules() {
            self.register(name, ModuleOrigin::Core, module)?;
        }
        Ok(self)
    }

    /// Register custom modules, in iteration order.
    pub fn with_custom<I, N>(mut self, modules: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = (N, FieldModule)>,
        N: Into<String>,
    {
        for (name, module) in modules {
            self.register(name, ModuleOrigin::Custom, module)?;
        }
        Ok(self)
    }

    pub fn build(self) -> FieldRegistry {
        tracing::debug!(types = self.modules.len(), "field registry built");
        FieldRegistry { modules: self.modules }
    }
}

fn validate_type_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::EmptyTypeName);
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(RegistryError::InvalidTypeName(name.to_string()));
    }
    Ok(())
}

/// One capability slot of a module, as returned by [`FieldRegistry::get`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Schema,
    DefaultValue,
    Read,
    Write,
    Sort,
    Edit,
    View,
}

/// Borrowed value of a capability slot.
pub enum CapabilityRef<'a> {
    Schema(&'a SchemaBuilder),
    DefaultValue(&'a DefaultValue),
    Read(&'a Transform),
    Write(&'a Transform),
    Sort(&'a SortFn),
    Edit(&'a ComponentRef),
    View(&'a ComponentRef),
}

/// Immutable lookup of field modules by type name.
#[derive(Debug, Default)]
pub struct FieldRegistry {
    modules: BTreeMap<String, Registered>,
}

impl FieldRegistry {
    /// Process-wide registry of the core and shipped custom modules.
    pub fn builtin() -> Result<Arc<FieldRegistry>, RegistryError> {
        static BUILTIN: OnceLock<Arc<FieldRegistry>> = OnceLock::new();

        if let Some(registry) = BUILTIN.get() {
            return Ok(Arc::clone(registry));
        }
        let registry = Arc::new(
            FieldRegistryBuilder::new().with_core()?.with_custom(custom::modules())?.build(),
        );
        Ok(Arc::clone(BUILTIN.get_or_init(|| registry)))
    }

    pub fn module(&self, name: &str) -> Option<&FieldModule> {
        self.modules.get(name).map(|r| r.module.as_ref())
    }

    /// Module of a type the caller cannot do without.
    pub fn require(&self, name: &str) -> Result<&FieldModule, FieldError> {
        self.module(name).ok_or_else(|| FieldError::UnknownFieldType {
            path: String::new(),
            type_name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Value of one capability slot; `None` if the type is unknown or the
    /// module does not supply it.
    pub fn get(&self, capability: Capability, name: &str) -> Option<CapabilityRef<'_>> {
        let module = self.module(name)?;
        match capability {
            Capability::Schema => module.schema.as_ref().map(CapabilityRef::Schema),
            Capability::DefaultValue => {
                module.default_value.as_ref().map(CapabilityRef::DefaultValue)
            }
            Capability::Read => module.read.as_ref().map(CapabilityRef::Read),
            Capability::Write => module.write.as_ref().map(CapabilityRef::Write),
            Capability::Sort => module.sort.as_ref().map(CapabilityRef::Sort),
            Capability::Edit => module.edit_component.as_ref().map(CapabilityRef::Edit),
            Capability::View => module.view_component.as_ref().map(CapabilityRef::View),
        }
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.module(name)?.label.as_deref()
    }

    pub fn schema_builder(&self, name: &str) -> Option<&SchemaBuilder> {
        self.module(name)?.schema.as_ref()
    }

    pub fn default_value(&self, name: &str) -> Option<&DefaultValue> {
        self.module(name)?.default_value.as_ref()
    }

    pub fn read_transform(&self, name: &str) -> Option<&Transform> {
        self.module(name)?.read.as_ref()
    }

    pub fn write_transform(&self, name: &str) -> Option<&Transform> {
        self.module(name)?.write.as_ref()
    }

    pub fn sort_fn(&self, name: &str) -> Option<&SortFn> {
        self.module(name)?.sort.as_ref()
    }

    pub fn edit_component(&self, name: &str) -> Option<&ComponentRef> {
        self.module(name)?.edit_component.as_ref()
    }

    pub fn view_component(&self, name: &str) -> Option<&ComponentRef> {
        self.module(name)?.view_component.as_ref()
    }

    /// Evaluate a type's default on its own; generators run on every call.
    pub fn type_default(&self, name: &str) -> Option<Value> {
        self.default_value(name).map(DefaultValue::produce)
    }

    /// Registered type names in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    pub fn origin(&self, name: &str) -> Option<ModuleOrigin> {
        self.modules.get(name).map(|r| r.origin)
    }

    pub fn capabilities(&self, name: &str) -> Option<Capabilities> {
        self.module(name).map(FieldModule::capabilities)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
