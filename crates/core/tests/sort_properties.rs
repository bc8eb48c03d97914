use std::cmp::Ordering;

use pagefields_core::types::{Field, FieldRegistry, sort_comparator};
use rstest::rstest;
use serde_yaml::Value;

fn values(yaml: &str) -> Vec<Value> {
    serde_yaml::from_str(yaml).unwrap()
}

#[rstest]
#[case("string", "[apple, Banana, banana, cherry, '', 42, true]")]
#[case("text", "[b, a, C]")]
#[case("number", "[3, '10', 2.5, '-1', nope, 0]")]
#[case("boolean", "[true, false, 'true', 1]")]
#[case("date", "['2024-01-02', '2023-12-31', 'soon', '2024-01-02']")]
#[case("select", "[draft, Live, archived]")]
#[case("image", "[/a.png, /B.png, /c.png]")]
#[case("uuid", "[9f1c1d34-2f6b-4a44-9c53-3f1a3c1c2c1a, 0b6f0c0e-4e55-4d3c-8a2b-111111111111]")]
#[case("color", "['#fff', '#000000', '#ABC']")]
fn comparator_is_antisymmetric_and_reflexive(#[case] type_name: &str, #[case] sample: &str) {
    let registry = FieldRegistry::builtin().unwrap();
    let compare = sort_comparator(type_name, &registry).unwrap();
    let field = Field::new("f", type_name);
    let sample = values(sample);

    for a in &sample {
        assert_eq!(compare(Some(a), Some(a), &field), Ordering::Equal, "{a:?}");
        for b in &sample {
            let ab = compare(Some(a), Some(b), &field);
            let ba = compare(Some(b), Some(a), &field);
            assert_eq!(ab, ba.reverse(), "{a:?} vs {b:?}");
        }
    }
}

#[rstest]
#[case("string", "x")]
#[case("number", "1")]
#[case("boolean", "false")]
#[case("date", "2024-01-01")]
#[case("color", "'#fff'")]
fn nulls_sort_after_present_values(#[case] type_name: &str, #[case] present: &str) {
    let registry = FieldRegistry::builtin().unwrap();
    let compare = sort_comparator(type_name, &registry).unwrap();
    let field = Field::new("f", type_name);
    let v: Value = serde_yaml::from_str(present).unwrap();

    assert_eq!(compare(Some(&v), Some(&Value::Null), &field), Ordering::Less);
    assert_eq!(compare(Some(&Value::Null), Some(&v), &field), Ordering::Greater);
    assert_eq!(compare(Some(&v), None, &field), Ordering::Less);
    assert_eq!(compare(None, Some(&v), &field), Ordering::Greater);
}

#[test]
fn number_sorts_numerically() {
    let registry = FieldRegistry::builtin().unwrap();
    let compare = sort_comparator("number", &registry).unwrap();
    let field = Field::new("n", "number");
    let mut sample = values("['10', 9, '2.5', -3]");
    sample.sort_by(|a, b| compare(Some(a), Some(b), &field));
    assert_eq!(sample, values("[-3, '2.5', 9, '10']"));
}

#[test]
fn date_sort_uses_declared_format() {
    let registry = FieldRegistry::builtin().unwrap();
    let compare = sort_comparator("date", &registry).unwrap();
    let field: Field =
        serde_yaml::from_str("{ name: d, type: date, options: { format: '%d.%m.%Y' } }").unwrap();
    let a = Value::String("02.01.2024".into());
    let b = Value::String("01.02.2024".into());
    assert_eq!(compare(Some(&a), Some(&b), &field), Ordering::Less);
}
