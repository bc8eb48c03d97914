//! Sort comparators for listing views.
//!
//! Missing and `null` values always sort after present ones, whatever the
//! type and the direction.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use super::errors::FieldError;
use super::registry::FieldRegistry;
use super::resolver::expand_component;
use super::schema::Field;
use crate::config::CmsConfig;

/// Comparator over possibly missing values of one field.
pub type Comparator = Arc<dyn Fn(Option<&Value>, Option<&Value>, &Field) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn nulls_last(
    a: Option<&Value>,
    b: Option<&Value>,
    compare: impl FnOnce(&Value, &Value) -> Ordering,
) -> Ordering {
    match (present(a), present(b)) {
        (Some(a), Some(b)) => compare(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Comparator of a type; `None` if the type is unknown or cannot be sorted.
pub fn sort_comparator(type_name: &str, registry: &FieldRegistry) -> Option<Comparator> {
    let sort = registry.sort_fn(type_name)?.clone();
    let comparator: Comparator =
        Arc::new(move |a: Option<&Value>, b: Option<&Value>, field: &Field| {
            nulls_last(a, b, |a, b| sort(a, b, field))
        });
    Some(comparator)
}

/// Compare two values of a field. Types without a comparator treat all
/// present values as equal.
pub fn compare_values(
    a: Option<&Value>,
    b: Option<&Value>,
    field: &Field,
    registry: &FieldRegistry,
) -> Ordering {
    match registry.sort_fn(field.effective_type()) {
        Some(sort) => nulls_last(a, b, |a, b| sort(a, b, field)),
        None => nulls_last(a, b, |_, _| Ordering::Equal),
    }
}

/// Stable sort of entries by one field.
///
/// Anything that can lend out its field mapping can be sorted, so callers
/// may keep file paths or bodies alongside the values.
pub fn sort_entries<T: Borrow<Mapping>>(
    entries: &mut [T],
    field: &Field,
    order: SortOrder,
    config: &CmsConfig,
    registry: &FieldRegistry,
) -> Result<(), FieldError> {
    let field = expand_component(field, config, &field.name)?;
    let key = field.name.as_str();
    entries.sort_by(|a, b| {
        let (a, b): (&Mapping, &Mapping) = (a.borrow(), b.borrow());
        let (a, b) = (a.get(key), b.get(key));
        match order {
            SortOrder::Ascending => compare_values(a, b, &field, registry),
            SortOrder::Descending => nulls_last(a, b, |a, b| {
                compare_values(Some(b), Some(a), &field, registry)
            }),
        }
    });
    tracing::debug!(field = key, entries = entries.len(), ?order, "sorted entries");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Arc<FieldRegistry> {
        FieldRegistry::builtin().unwrap()
    }

    fn s(v: &str) -> Value {
        Value::String(v.into())
    }

    #[test]
    fn test_unknown_type_has_no_comparator() {
        assert!(sort_comparator("nope", &registry()).is_none());
        assert!(sort_comparator("object", &registry()).is_none());
        assert!(sort_comparator("string", &registry()).is_some());
    }

    #[test]
    fn test_comparator_puts_nulls_last() {
        let compare = sort_comparator("string", &registry()).unwrap();
        let field = Field::new("title", "string");
        let v = s("zebra");
        assert_eq!(compare(Some(&v), Some(&Value::Null), &field), Ordering::Less);
        assert_eq!(compare(None, Some(&v), &field), Ordering::Greater);
        assert_eq!(compare(None, Some(&Value::Null), &field), Ordering::Equal);
    }

    #[test]
    fn test_sort_entries_descending_keeps_nulls_last() {
        let mut entries: Vec<Mapping> = serde_yaml::from_str(
            "[{ n: 2 }, { n: null }, { n: 10 }, { other: x }, { n: 1 }]",
        )
        .unwrap();
        let field = Field::new("n", "number");
        sort_entries(&mut entries, &field, SortOrder::Descending, &CmsConfig::default(), &registry())
            .unwrap();
        let order: Vec<_> = entries.iter().map(|e| e.get("n").cloned()).collect();
        assert_eq!(
            order,
            vec![
                Some(Value::Number(10.into())),
                Some(Value::Number(2.into())),
                Some(Value::Number(1.into())),
                Some(Value::Null),
                None,
            ]
        );
    }

    #[test]
    fn test_sort_entries_is_stable() {
        let mut entries: Vec<Mapping> =
            serde_yaml::from_str("[{ t: B, id: 1 }, { t: a, id: 2 }, { t: b, id: 3 }]").unwrap();
        let field = Field::new("t", "string");
        sort_entries(&mut entries, &field, SortOrder::Ascending, &CmsConfig::default(), &registry())
            .unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.get("id").and_then(Value::as_u64)).collect();
        assert_eq!(ids, vec![Some(2), Some(1), Some(3)]);
    }
}
