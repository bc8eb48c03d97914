//! Turns field declarations into validators.
//!
//! Resolution is pure: the same declarations, configuration and registry
//! always produce the same validator, and nothing is cached between calls.

use std::borrow::Cow;
use std::collections::HashSet;

use super::errors::FieldError;
use super::registry::FieldRegistry;
use super::schema::Field;
use super::validation::{Schema, Validator, join_path};
use crate::config::CmsConfig;

/// Resolve one declaration.
pub fn resolve_validator(
    field: &Field,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Validator, FieldError> {
    resolve_at(field, &field.name, config, registry)
}

/// Resolve the declarations of a whole entry into a root object validator.
pub fn resolve_fields(
    fields: &[Field],
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Validator, FieldError> {
    let children = resolve_children(fields, "", config, registry)?;
    tracing::debug!(fields = children.len(), "resolved entry validator");
    Ok(Validator::new("", false, Schema::Object(children)))
}

/// Resolve the declarations of a content entry by name.
pub fn resolve_entry(
    entry_name: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Validator, FieldError> {
    let entry = config
        .entry(entry_name)
        .ok_or_else(|| FieldError::UnknownEntry(entry_name.to_string()))?;
    resolve_fields(&entry.fields, config, registry)
}

fn resolve_at(
    field: &Field,
    path: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Validator, FieldError> {
    let field = expand_component(field, config, path)?;
    let module = registry.require(field.effective_type()).map_err(|e| e.at(path))?;

    let schema = if let Some(blocks) = &field.blocks {
        ensure_unique(blocks, path)?;
        let variants = blocks
            .iter()
            .map(|block| resolve_variant(block, path, config, registry))
            .collect::<Result<Vec<_>, _>>()?;
        Schema::Union { key: field.block_key().to_string(), variants }
    } else if let Some(fields) = &field.fields {
        Schema::Object(resolve_children(fields, path, config, registry)?)
    } else if let Some(build) = &module.schema {
        build(&*field, config).map_err(|e| e.at(path))?
    } else {
        Schema::Any
    };

    if field.is_list() {
        let (min, max) = field.list_bounds();
        let item = Validator::new(&field.name, field.required, schema);
        return Ok(Validator::new(
            &field.name,
            field.required,
            Schema::List { item: Box::new(item), min, max },
        ));
    }
    Ok(Validator::new(&field.name, field.required, schema))
}

fn resolve_children(
    fields: &[Field],
    parent: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Vec<Validator>, FieldError> {
    ensure_unique(fields, parent)?;
    fields
        .iter()
        .map(|child| resolve_at(child, &join_path(parent, &child.name), config, registry))
        .collect()
}

/// A block variant: an object validator named after its tag.
fn resolve_variant(
    block: &Field,
    parent: &str,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<Validator, FieldError> {
    let path = join_path(parent, &block.name);
    let block = expand_component(block, config, &path)?;
    let children = match &block.fields {
        Some(fields) => resolve_children(fields, &path, config, registry)?,
        None => Vec::new(),
    };
    Ok(Validator::new(&block.name, false, Schema::Object(children)))
}

fn ensure_unique(fields: &[Field], parent: &str) -> Result<(), FieldError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            let parent = if parent.is_empty() { "<root>" } else { parent };
            return Err(FieldError::DuplicateField {
                parent: parent.to_string(),
                name: field.name.clone(),
            });
        }
    }
    Ok(())
}

/// Inline the `component` a declaration refers to, following nested references.
///
/// Keys set on the referring declaration take precedence over the
/// component's; `required`, `hidden` and `readonly` are set if either sets them.
pub(crate) fn expand_component<'a>(
    field: &'a Field,
    config: &CmsConfig,
    path: &str,
) -> Result<Cow<'a, Field>, FieldError> {
    let Some(first) = &field.component else {
        return Ok(Cow::Borrowed(field));
    };

    let mut chain = vec![first.clone()];
    let mut merged = field.clone();
    let mut next = Some(first.clone());

    while let Some(name) = next {
        let component = config.component(&name).ok_or_else(|| FieldError::UnknownComponent {
            path: path.to_string(),
            component: name.clone(),
        })?;
        merged = merge(merged, component);
        next = component.component.clone();

        if let Some(name) = &next {
            let cycle = chain.contains(name);
            chain.push(name.clone());
            if cycle {
                return Err(FieldError::ComponentCycle { path: path.to_string(), chain });
            }
        }
    }

    merged.component = None;
    Ok(Cow::Owned(merged))
}

fn merge(local: Field, component: &Field) -> Field {
    let mut options = component.options.clone();
    for (key, value) in local.options {
        options.insert(key, value);
    }

    Field {
        name: local.name,
        label: local.label.or_else(|| component.label.clone()),
        field_type: local.field_type.or_else(|| component.field_type.clone()),
        description: local.description.or_else(|| component.description.clone()),
        required: local.required || component.required,
        pattern: local.pattern.or_else(|| component.pattern.clone()),
        options,
        default: local.default.or_else(|| component.default.clone()),
        list: local.list.or_else(|| component.list.clone()),
        fields: local.fields.or_else(|| component.fields.clone()),
        blocks: local.blocks.or_else(|| component.blocks.clone()),
        block_key: local.block_key.or_else(|| component.block_key.clone()),
        component: local.component,
        hidden: local.hidden || component.hidden,
        readonly: local.readonly || component.readonly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::ValidationError;
    use serde_yaml::{Mapping, Value};

    fn registry() -> std::sync::Arc<FieldRegistry> {
        FieldRegistry::builtin().unwrap()
    }

    fn fields(yaml: &str) -> Vec<Field> {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn entry(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_unknown_type_carries_path() {
        let fields = fields(
            r#"
            - name: gallery
              type: object
              fields:
                - { name: slides, type: carousel }
            "#,
        );
        let err = resolve_fields(&fields, &CmsConfig::default(), &registry()).unwrap_err();
        assert!(matches!(
            err,
            FieldError::UnknownFieldType { path, type_name }
                if path == "gallery.slides" && type_name == "carousel"
        ));
    }

    #[test]
    fn test_missing_type_defaults_to_string() {
        let field: Field = serde_yaml::from_str("name: title\noptions: { maxlength: 3 }").unwrap();
        let v = resolve_validator(&field, &CmsConfig::default(), &registry()).unwrap();
        assert!(matches!(v.schema, Schema::String(_)));
        assert!(!v.validate(Some(&Value::String("long".into()))).valid);
    }

    #[test]
    fn test_type_without_builder_accepts_anything() {
        let registry = crate::types::registry::FieldRegistryBuilder::new()
            .with_custom([("loose", crate::fields::FieldModule::new())])
            .unwrap()
            .build();
        let v = resolve_validator(&Field::new("x", "loose"), &CmsConfig::default(), &registry)
            .unwrap();
        assert!(matches!(v.schema, Schema::Any));
        assert!(v.validate(Some(&Value::Sequence(vec![]))).valid);
    }

    #[test]
    fn test_duplicate_siblings_rejected() {
        let fields = fields("- { name: a }\n- { name: a, type: number }");
        let err = resolve_fields(&fields, &CmsConfig::default(), &registry()).unwrap_err();
        assert!(matches!(err, FieldError::DuplicateField { name, .. } if name == "a"));
    }

    #[test]
    fn test_list_wraps_item_schema() {
        let fields = fields("- { name: scores, type: number, list: { min: 1, max: 2 } }");
        let v = resolve_fields(&fields, &CmsConfig::default(), &registry()).unwrap();
        let result = v.validate_entry(&entry("scores: [1, x, 3]"));
        assert!(result.errors.iter().any(|e| matches!(e, ValidationError::ListLength { .. })));
        assert!(result.errors.iter().any(|e| e.path() == "scores[1]"));
    }

    #[test]
    fn test_nested_object_paths() {
        let fields = fields(
            r#"
            - name: authors
              type: object
              list: true
              fields:
                - { name: name, type: string, required: true }
            "#,
        );
        let v = resolve_fields(&fields, &CmsConfig::default(), &registry()).unwrap();
        let result = v.validate_entry(&entry("authors: [{ name: Ann }, { name: '' }]"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].path(), "authors[1].name");
    }

    #[test]
    fn test_invalid_pattern_reported_at_full_path() {
        let fields = fields(
            r#"
            - name: seo
              type: object
              fields:
                - { name: slug, pattern: "([a-z" }
            "#,
        );
        let err = resolve_fields(&fields, &CmsConfig::default(), &registry()).unwrap_err();
        assert!(matches!(err, FieldError::InvalidPattern { path, .. } if path == "seo.slug"));
    }

    #[test]
    fn test_component_expansion_local_keys_win() {
        let config = CmsConfig::from_yaml_str(
            r#"
            components:
              headline:
                name: headline
                type: string
                required: true
                options: { maxlength: 10, minlength: 2 }
            "#,
        )
        .unwrap();
        let field: Field =
            serde_yaml::from_str("name: title\ncomponent: headline\noptions: { maxlength: 4 }")
                .unwrap();
        let expanded = expand_component(&field, &config, "title").unwrap();
        assert_eq!(expanded.name, "title");
        assert!(expanded.required);
        assert_eq!(expanded.option_usize("maxlength"), Some(4));
        assert_eq!(expanded.option_usize("minlength"), Some(2));
        assert!(expanded.component.is_none());
    }

    #[test]
    fn test_component_errors() {
        let config = CmsConfig::from_yaml_str(
            r#"
            components:
              a: { name: a, component: b }
              b: { name: b, component: a }
            "#,
        )
        .unwrap();

        let unknown: Field = serde_yaml::from_str("name: x\ncomponent: nope").unwrap();
        assert!(matches!(
            expand_component(&unknown, &config, "x"),
            Err(FieldError::UnknownComponent { component, .. }) if component == "nope"
        ));

        let cyclic: Field = serde_yaml::from_str("name: x\ncomponent: a").unwrap();
        match expand_component(&cyclic, &config, "x") {
            Err(FieldError::ComponentCycle { chain, .. }) => assert_eq!(chain, ["a", "b", "a"]),
            other => panic!("expected ComponentCycle, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_entry() {
        let err = resolve_entry("posts", &CmsConfig::default(), &registry()).unwrap_err();
        assert!(matches!(err, FieldError::UnknownEntry(name) if name == "posts"));
    }
}
