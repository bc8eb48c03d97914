//! UUID type: a fresh v4 identifier is generated for every new value.

use serde_yaml::Value;

use super::compare_text;
use crate::fields::FieldModule;
use crate::types::validation::Schema;

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("UUID")
        .with_schema(|_, _| Ok(Schema::Uuid))
        .with_default_fn(|| Value::String(::uuid::Uuid::new_v4().to_string()))
        .with_sort(|a, b, _| compare_text(a, b))
        .with_components("uuid-input", "text-view")
}
