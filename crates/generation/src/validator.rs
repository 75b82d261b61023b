//! C11 — static validator. Cheap, synchronous checks run first and in
//! a fixed category order (§4.10); the TSC stage only runs when every
//! cheap check passes, since it is the expensive one.

use async_trait::async_trait;
use forge_core::{ErrorCategory, ValidationResult};
use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Import prefixes allowed in generated source, matched against the
/// module specifier of every `import ... from "X"` / `require("X")`.
const ALLOWED_IMPORT_PREFIXES: &[&str] = &["@chainlink/cre-sdk", "zod", "viem"];

const TSC_TIMEOUT: Duration = Duration::from_secs(15);
const TSC_OUTPUT_TRUNCATE_BYTES: usize = 1024;

static IMPORT_SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:import\s+(?:[\w{}*\s,]+\s+from\s+)?|require\()\s*["']([^"']+)["']"#).unwrap()
});

static HANDLER_ASYNC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"handler\s*\(\s*[^,]+,\s*async\b").unwrap());

static THEN_ASYNC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.then\s*\(\s*async\b").unwrap());

static MAIN_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+(?:async\s+)?function\s+main\b|export\s*\{[^}]*\bmain\b[^}]*\}").unwrap());

static CONFIG_SCHEMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"configSchema\s*=\s*z\s*\.\s*object\s*\(").unwrap());

fn is_allowed_import(specifier: &str) -> bool {
    if specifier.starts_with("./") || specifier.starts_with("../") || specifier.starts_with('/') {
        return true;
    }
    ALLOWED_IMPORT_PREFIXES
        .iter()
        .any(|p| specifier == *p || specifier.starts_with(&format!("{p}/")))
}

fn check_imports(source: &str, result: &mut ValidationResult) {
    for cap in IMPORT_SPECIFIER.captures_iter(source) {
        let specifier = &cap[1];
        if !is_allowed_import(specifier) {
            result.push_error(
                ErrorCategory::Import,
                format!("disallowed import: \"{specifier}\""),
            );
        }
    }
}

fn check_async(source: &str, result: &mut ValidationResult) {
    if HANDLER_ASYNC.is_match(source) {
        result.push_error(
            ErrorCategory::Async,
            "handler callback must not be declared async",
        );
    }
    if THEN_ASYNC.is_match(source) {
        result.push_error(ErrorCategory::Async, ".then(async ...) is not allowed");
    }
    if let Some(m) = HANDLER_ASYNC.find(source) {
        if source[m.end()..].contains("await ") {
            result.push_error(
                ErrorCategory::Async,
                "handler callback body must not use await",
            );
        }
    }
}

fn check_main(source: &str, result: &mut ValidationResult) {
    if !MAIN_EXPORT.is_match(source) {
        result.push_error(ErrorCategory::Main, "no exported top-level `main` function");
    }
}

fn check_zod(source: &str, result: &mut ValidationResult) {
    if !CONFIG_SCHEMA.is_match(source) {
        result.push_error(
            ErrorCategory::Zod,
            "missing top-level `configSchema = z.object(...)`",
        );
    }
}

/// §4.10: a parsed, non-null, non-array config object is required, and
/// it must carry the key implied by whatever the workflow actually
/// does (a cron schedule, an onchain write, or an HTTP call).
fn check_config(
    config: &serde_json::Value,
    source: &str,
    trigger_is_cron: bool,
    result: &mut ValidationResult,
) {
    let obj = match config {
        serde_json::Value::Object(o) => o,
        serde_json::Value::Null => {
            result.push_error(ErrorCategory::Config, "config is null");
            return;
        }
        _ => {
            result.push_error(ErrorCategory::Config, "config must be a JSON object");
            return;
        }
    };
    if trigger_is_cron && !obj.contains_key("schedule") && !obj.contains_key("cron") {
        result.push_error(
            ErrorCategory::Config,
            "cron-triggered workflow is missing a schedule key in config",
        );
    }
    if source.contains("writeContract") && !obj.contains_key("chainId") && !obj.contains_key("chain") {
        result.push_error(
            ErrorCategory::Config,
            "onchain write is missing a chain id key in config",
        );
    }
    if source.contains("HTTPClient") && !obj.contains_key("url") && !obj.contains_key("endpoint") {
        result.push_error(
            ErrorCategory::Config,
            "HTTP call is missing a url/endpoint key in config",
        );
    }
}

#[derive(Debug, Clone)]
pub struct TypeCheckOutcome {
    pub ok: bool,
    /// Truncated to at most 1KB (§4.10).
    pub output: String,
}

/// Collaborator boundary for the TypeScript compiler subprocess stage;
/// a production implementation shells out to `tsc` in `forge-service`.
#[async_trait]
pub trait TypeChecker: Send + Sync {
    async fn check(&self, source: &str) -> TypeCheckOutcome;
}

fn truncate_output(output: String) -> String {
    if output.len() <= TSC_OUTPUT_TRUNCATE_BYTES {
        output
    } else {
        let mut truncated = output;
        truncated.truncate(TSC_OUTPUT_TRUNCATE_BYTES);
        truncated
    }
}

/// Run the cheap checks; the caller runs the TSC stage separately
/// (via `run_tsc`) only when this returns no errors.
pub fn run_cheap_checks(
    source: &str,
    config: &serde_json::Value,
    trigger_is_cron: bool,
) -> ValidationResult {
    let mut result = ValidationResult::default();
    check_imports(source, &mut result);
    check_async(source, &mut result);
    check_main(source, &mut result);
    check_zod(source, &mut result);
    check_config(config, source, trigger_is_cron, &mut result);
    result
}

/// §4.10: bounded by `TSC_TIMEOUT`; a timeout is reported as a `TSC`
/// category error rather than propagated, since the validator must
/// always produce a `ValidationResult`.
pub async fn run_tsc(checker: &dyn TypeChecker, source: &str, result: &mut ValidationResult) {
    match tokio::time::timeout(TSC_TIMEOUT, checker.check(source)).await {
        Ok(outcome) => {
            if !outcome.ok {
                result.push_error(ErrorCategory::Tsc, truncate_output(outcome.output));
            }
        }
        Err(_) => {
            result.push_error(ErrorCategory::Tsc, "type check timed out");
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
