use super::*;

#[test]
fn valid_iff_no_errors() {
    let mut result = ValidationResult::default();
    assert!(result.valid());
    result.push_error(ErrorCategory::Import, "disallowed module 'fs'");
    assert!(!result.valid());
}

#[test]
fn formatted_error_has_uppercase_category_tag() {
    let err = ValidationError::new(ErrorCategory::Zod, "missing configSchema");
    assert_eq!(err.formatted(), "[ZOD] missing configSchema");
}

#[test]
fn numbered_errors_are_one_indexed_in_order() {
    let mut result = ValidationResult::default();
    result.push_error(ErrorCategory::Import, "bad import");
    result.push_error(ErrorCategory::Main, "missing main");
    assert_eq!(
        result.numbered_errors(),
        "1. [IMPORT] bad import\n2. [MAIN] missing main"
    );
}

#[test]
fn warnings_do_not_affect_validity() {
    let mut result = ValidationResult::default();
    result.warnings.push("style: prefer const".to_string());
    assert!(result.valid());
}
