//! Entry serialization.

use serde_yaml::{Mapping, Value};

use super::parser::EntryError;
use super::types::{EntryDocument, EntryFormat};

/// Serialize an entry, placing `order` keys first and the rest alphabetically.
pub fn serialize(
    doc: &EntryDocument,
    format: EntryFormat,
    order: Option<&[String]>,
) -> Result<String, EntryError> {
    let fields = ordered(&doc.fields, order);
    match format {
        EntryFormat::YamlFrontmatter => {
            let body = doc.body.as_deref().unwrap_or_default();
            if fields.is_empty() {
                return Ok(body.to_string());
            }
            let yaml = serde_yaml::to_string(&fields)?;
            // A parsed body keeps the blank line that followed the block.
            let gap = if body.starts_with('\n') || body.starts_with("\r\n") { "\n" } else { "\n\n" };
            Ok(format!("---\n{}---{}{}", yaml, gap, body))
        }
        EntryFormat::Yaml => Ok(serde_yaml::to_string(&fields)?),
        EntryFormat::Json => {
            let mut json = serde_json::to_string_pretty(&fields)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn ordered(fields: &Mapping, order: Option<&[String]>) -> Mapping {
    let mut mapping = Mapping::new();

    // 1. Add fields in specified order
    if let Some(order_list) = order {
        for key in order_list {
            if let Some(value) = fields.get(key.as_str()) {
                mapping.insert(Value::String(key.clone()), value.clone());
            }
        }
    }

    // 2. Add remaining fields (sorted alphabetically)
    let mut remaining: Vec<(&Value, &Value)> =
        fields.iter().filter(|(k, _)| !mapping.contains_key(*k)).collect();
    remaining.sort_by_key(|(k, _)| k.as_str().map(str::to_string).unwrap_or_default());

    for (key, value) in remaining {
        mapping.insert(key.clone(), value.clone());
    }

    mapping
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::parser::parse;

    #[test]
    fn serialize_document_without_fields() {
        let doc = EntryDocument { fields: Mapping::new(), body: Some("# Hello\n\nWorld".into()) };
        assert_eq!(
            serialize(&doc, EntryFormat::YamlFrontmatter, None).unwrap(),
            "# Hello\n\nWorld"
        );
    }

    #[test]
    fn serialize_with_schema_order() {
        let doc = parse("---\nzeta: 1\ntitle: T\nalpha: 2\n---\nBody", EntryFormat::YamlFrontmatter)
            .unwrap();
        let order = vec!["title".to_string()];
        let out = serialize(&doc, EntryFormat::YamlFrontmatter, Some(&order)).unwrap();
        assert_eq!(out, "---\ntitle: T\nalpha: 2\nzeta: 1\n---\n\nBody");
    }

    #[test]
    fn roundtrip_frontmatter() {
        let original = "---\ntitle: Hello\ncount: 42\n---\n\n# Body";
        let parsed = parse(original, EntryFormat::YamlFrontmatter).unwrap();
        let serialized = serialize(&parsed, EntryFormat::YamlFrontmatter, None).unwrap();

        let reparsed = parse(&serialized, EntryFormat::YamlFrontmatter).unwrap();
        assert_eq!(reparsed.fields.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(reparsed.fields.get("count").and_then(|v| v.as_i64()), Some(42));
        assert!(reparsed.body.unwrap().contains("# Body"));
    }

    #[test]
    fn repeated_roundtrip_is_stable() {
        let original = "---\ncount: 42\ntitle: Hello\n---\n\n# Body\n";
        let once = serialize(&parse(original, EntryFormat::YamlFrontmatter).unwrap(), EntryFormat::YamlFrontmatter, None)
            .unwrap();
        assert_eq!(once, original);
        let twice = serialize(&parse(&once, EntryFormat::YamlFrontmatter).unwrap(), EntryFormat::YamlFrontmatter, None)
            .unwrap();
        assert_eq!(twice, original);
    }

    #[test]
    fn serialize_json() {
        let doc = parse("{\"b\": 1, \"a\": true}", EntryFormat::Json).unwrap();
        let out = serialize(&doc, EntryFormat::Json, None).unwrap();
        assert_eq!(out, "{\n  \"a\": true,\n  \"b\": 1\n}\n");
    }
}
