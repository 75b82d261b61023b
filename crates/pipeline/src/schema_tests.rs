use super::*;
use forge_core::SchemaField;
use std::collections::BTreeMap;

fn field(ty: &str) -> SchemaField {
    SchemaField {
        field_type: ty.to_string(),
        description: None,
    }
}

fn schema(props: &[(&str, &str)], required: &[&str]) -> RestrictedSchema {
    RestrictedSchema {
        schema_type: "object".to_string(),
        properties: props.iter().map(|(k, v)| (k.to_string(), field(v))).collect::<BTreeMap<_, _>>(),
        required: required.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn exact_name_and_type_match_scores_full_confidence() {
    let output = schema(&[("price", "number")], &[]);
    let input = schema(&[("price", "number")], &["price"]);
    let report = check_schema_compatibility(&output, &input);
    assert!(report.compatible);
    assert_eq!(report.score, 1.0);
    assert_eq!(report.matched_fields[0].confidence, 1.0);
}

#[test]
fn near_miss_name_with_compatible_type_scores_point_eight() {
    let output = schema(&[("pricee", "number")], &[]);
    let input = schema(&[("price", "string")], &["price"]);
    let report = check_schema_compatibility(&output, &input);
    assert!(report.compatible);
    assert_eq!(report.matched_fields[0].confidence, 0.8);
}

#[test]
fn compatible_type_only_scores_point_five() {
    let output = schema(&[("totallyDifferentName", "boolean")], &[]);
    let input = schema(&[("price", "number")], &["price"]);
    let report = check_schema_compatibility(&output, &input);
    assert!(report.compatible);
    assert_eq!(report.matched_fields[0].confidence, 0.5);
}

#[test]
fn incompatible_types_and_names_leave_required_field_unmatched() {
    let output = schema(&[("unrelated", "object")], &[]);
    let input = schema(&[("price", "number")], &["price"]);
    let report = check_schema_compatibility(&output, &input);
    assert!(!report.compatible);
    assert_eq!(report.unmatched_required, vec!["price".to_string()]);
    assert_eq!(report.score, 0.0);
}

#[test]
fn each_source_field_matches_at_most_one_target() {
    let output = schema(&[("value", "number")], &[]);
    let input = schema(&[("price", "number"), ("amount", "number")], &["price", "amount"]);
    let report = check_schema_compatibility(&output, &input);
    // Only one target can claim "value"; the other is unmatched.
    assert_eq!(report.matched_fields.len(), 1);
    assert_eq!(report.unmatched_required.len(), 1);
}

#[test]
fn matched_fields_are_ordered_by_descending_confidence() {
    let output = schema(&[("price", "number"), ("qty", "boolean")], &[]);
    let input = schema(&[("price", "number"), ("amount", "number")], &["price", "amount"]);
    let report = check_schema_compatibility(&output, &input);
    for pair in report.matched_fields.windows(2) {
        assert!(pair[0].confidence >= pair[1].confidence);
    }
}

#[test]
fn idempotence_repeated_calls_produce_the_same_permutation() {
    let output = schema(&[("price", "number"), ("qty", "boolean"), ("note", "string")], &[]);
    let input = schema(
        &[("price", "number"), ("amount", "number"), ("memo", "string")],
        &["price", "amount", "memo"],
    );
    let first = check_schema_compatibility(&output, &input);
    let second = check_schema_compatibility(&output, &input);
    assert_eq!(first.matched_fields, second.matched_fields);
}

#[test]
fn coerce_numeric_string_with_garbage_becomes_zero() {
    assert_eq!(coerce_value(&Value::String("not a number".to_string()), "number"), Value::from(0));
}

#[test]
fn coerce_numeric_string_parses_base_ten() {
    assert_eq!(coerce_value(&Value::String("42".to_string()), "number"), Value::from(42.0));
}

#[test]
fn coerce_boolean_truthiness() {
    assert_eq!(coerce_value(&Value::from(0), "boolean"), Value::Bool(false));
    assert_eq!(coerce_value(&Value::from(7), "boolean"), Value::Bool(true));
    assert_eq!(coerce_value(&Value::String("false".to_string()), "boolean"), Value::Bool(false));
}

#[test]
fn coerce_to_string_is_canonical() {
    assert_eq!(coerce_value(&Value::from(42), "string"), Value::String("42".to_string()));
    assert_eq!(coerce_value(&Value::Bool(true), "string"), Value::String("true".to_string()));
}

#[test]
fn no_required_fields_with_a_match_scores_full() {
    let output = schema(&[("price", "number")], &[]);
    let input = schema(&[("price", "number")], &[]);
    let report = check_schema_compatibility(&output, &input);
    assert_eq!(report.score, 1.0);
}
