use super::*;
use serde_json::json;

const GOOD_SOURCE: &str = r#"
import { handler } from "@chainlink/cre-sdk";
import { z } from "zod";

const configSchema = z.object({ schedule: z.string(), url: z.string() });

export function main() {
  handler(trigger, (payload) => {
    const data = HTTPClient.get(payload.url);
    return data;
  });
}
"#;

#[test]
fn clean_source_and_config_pass_all_cheap_checks() {
    let config = json!({ "schedule": "*/5 * * * *", "url": "https://example.com" });
    let result = run_cheap_checks(GOOD_SOURCE, &config, true);
    assert!(result.valid(), "{:?}", result.errors);
}

#[test]
fn disallowed_import_is_rejected() {
    let source = GOOD_SOURCE.replace(
        "import { handler } from \"@chainlink/cre-sdk\";",
        "import fs from \"fs\";\nimport { handler } from \"@chainlink/cre-sdk\";",
    );
    let config = json!({ "schedule": "*/5 * * * *", "url": "https://example.com" });
    let result = run_cheap_checks(&source, &config, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Import));
}

#[test]
fn async_handler_callback_is_rejected() {
    let source = GOOD_SOURCE.replace("(payload) => {", "async (payload) => {\n    await 1;");
    let config = json!({ "schedule": "*/5 * * * *", "url": "https://example.com" });
    let result = run_cheap_checks(&source, &config, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Async));
}

#[test]
fn missing_main_export_is_rejected() {
    let source = GOOD_SOURCE.replace("export function main", "function main");
    let config = json!({ "schedule": "*/5 * * * *", "url": "https://example.com" });
    let result = run_cheap_checks(&source, &config, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Main));
}

#[test]
fn missing_config_schema_is_rejected() {
    let source = GOOD_SOURCE.replace("const configSchema = z.object({ schedule: z.string(), url: z.string() });", "");
    let config = json!({ "schedule": "*/5 * * * *", "url": "https://example.com" });
    let result = run_cheap_checks(&source, &config, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Zod));
}

#[test]
fn cron_trigger_without_schedule_key_is_rejected() {
    let config = json!({ "url": "https://example.com" });
    let result = run_cheap_checks(GOOD_SOURCE, &config, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Config));
}

#[test]
fn null_config_is_rejected() {
    let result = run_cheap_checks(GOOD_SOURCE, &serde_json::Value::Null, true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Config));
}

#[test]
fn array_config_is_rejected() {
    let result = run_cheap_checks(GOOD_SOURCE, &json!([1, 2, 3]), true);
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Config));
}

struct AlwaysOkChecker;

#[async_trait::async_trait]
impl TypeChecker for AlwaysOkChecker {
    async fn check(&self, _source: &str) -> TypeCheckOutcome {
        TypeCheckOutcome { ok: true, output: String::new() }
    }
}

struct AlwaysFailChecker;

#[async_trait::async_trait]
impl TypeChecker for AlwaysFailChecker {
    async fn check(&self, _source: &str) -> TypeCheckOutcome {
        TypeCheckOutcome { ok: false, output: "type error on line 3".to_string() }
    }
}

#[tokio::test]
async fn tsc_stage_adds_no_error_when_checker_passes() {
    let mut result = ValidationResult::default();
    run_tsc(&AlwaysOkChecker, GOOD_SOURCE, &mut result).await;
    assert!(result.valid());
}

#[tokio::test]
async fn tsc_stage_reports_category_error_when_checker_fails() {
    let mut result = ValidationResult::default();
    run_tsc(&AlwaysFailChecker, GOOD_SOURCE, &mut result).await;
    assert!(result.errors.iter().any(|e| e.category == ErrorCategory::Tsc));
}

#[test]
fn truncate_output_caps_at_1kb() {
    let long = "x".repeat(5000);
    assert_eq!(truncate_output(long).len(), TSC_OUTPUT_TRUNCATE_BYTES);
}
