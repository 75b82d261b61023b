use super::*;

#[test]
fn error_code_serializes_screaming_snake_case() {
    let json = serde_json::to_string(&ErrorCode::WorkflowNotFound).unwrap();
    assert_eq!(json, "\"WORKFLOW_NOT_FOUND\"");
}

#[test]
fn not_found_codes_are_never_auto_retried() {
    for code in [
        ErrorCode::WorkflowNotFound,
        ErrorCode::PipelineNotFound,
        ErrorCode::TemplateNotFound,
        ErrorCode::InvalidInput,
        ErrorCode::Unauthorized,
        ErrorCode::PipelineDeactivated,
        ErrorCode::SseCapacityFull,
    ] {
        assert!(!code.is_auto_retryable(), "{code:?} should not auto-retry");
    }
}

#[test]
fn forge_error_envelope_round_trips() {
    let err = ForgeError::new(ErrorCode::TemplateNotFound, "no template matched")
        .with_details(serde_json::json!({"prompt": "abc"}));
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["code"], "TEMPLATE_NOT_FOUND");
    assert_eq!(json["message"], "no template matched");
    assert_eq!(json["details"]["prompt"], "abc");
}
