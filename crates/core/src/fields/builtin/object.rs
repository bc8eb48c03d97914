//! Object and block types.
//!
//! The resolver builds these from `fields` and `blocks` directly; the schema
//! builders here only cover declarations that omit them.

use crate::fields::FieldModule;
use crate::types::validation::Schema;

pub fn module() -> FieldModule {
    FieldModule::new()
        .with_label("Object")
        .with_schema(|_, _| Ok(Schema::Object(Vec::new())))
        .with_components("object-editor", "object-view")
}

pub fn block_module() -> FieldModule {
    FieldModule::new()
        .with_label("Block")
        .with_schema(|field, _| {
            Ok(Schema::Union { key: field.block_key().to_string(), variants: Vec::new() })
        })
        .with_components("block-editor", "block-view")
}
