//! C14 — the trace parser. A single-pass, line-oriented classifier
//! over a `(regex, capability, extractor)` lookup table (§4.13, §9).

use forge_core::{Capability, SimulationStep, StepStatus};
use regex::Regex;
use std::sync::LazyLock;

/// Lines shorter than this, once classified as neither a pattern hit,
/// an error, a warning, nor noise, are dropped rather than emitted as
/// a generic step — too little content to be "meaningful" (§4.13.5).
const MEANINGFUL_MIN_LEN: usize = 8;
const ACTION_TRUNCATE_LEN: usize = 200;

struct PatternRule {
    prefix: Regex,
    capability: Capability,
}

static PATTERN_RULES: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        PatternRule {
            prefix: Regex::new(r"^\[TRIGGER\]").unwrap(),
            capability: Capability::Trigger,
        },
        PatternRule {
            prefix: Regex::new(r"^\[HTTP(?:Client)?\]").unwrap(),
            capability: Capability::HttpClient,
        },
        PatternRule {
            prefix: Regex::new(r"^\[EVM(?:Client)?\]").unwrap(),
            capability: Capability::EvmClient,
        },
        PatternRule {
            prefix: Regex::new(r"^\[CONSENSUS\]").unwrap(),
            capability: Capability::Consensus,
        },
        PatternRule {
            prefix: Regex::new(r"^\[NODE_MODE\]").unwrap(),
            capability: Capability::RunInNodeMode,
        },
    ]
});

static ERROR_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(error|fatal|failed)\b").unwrap());
static WARNING_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*warning\b").unwrap());

/// Installer/package-manager chatter that carries no simulation
/// signal; dropped before the "meaningful" fallback tier.
static NOISE_MARKERS: &[&str] = &[
    "npm WARN",
    "npm notice",
    "added ",
    "packages in",
    "audited ",
    "up to date",
    "Resolving dependencies",
    "Fetching packages",
];

static HTTP_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(GET|POST|PUT|DELETE|PATCH)\s+(\S+)(?:\s*->\s*(\d{3}))?").unwrap()
});
static EVM_DATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(readContract|writeContract)").unwrap());
static CONSENSUS_DATA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(median|identical|by-field)").unwrap());
static DURATION_MS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"duration:\s*(\d+)\s*ms").unwrap());
static DURATION_SECS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"took:\s*(\d+)\s*seconds?").unwrap());

fn is_noise(line: &str) -> bool {
    NOISE_MARKERS.iter().any(|m| line.contains(m))
}

fn extract_duration_ms(line: &str) -> Option<u64> {
    if let Some(c) = DURATION_MS.captures(line) {
        return c[1].parse().ok();
    }
    if let Some(c) = DURATION_SECS.captures(line) {
        return c[1].parse::<u64>().ok().map(|s| s * 1000);
    }
    None
}

fn status_for(line: &str) -> StepStatus {
    let lower = line.to_lowercase();
    if lower.contains("skipped") {
        StepStatus::Skipped
    } else if lower.contains("error") {
        StepStatus::Error
    } else {
        StepStatus::Success
    }
}

fn extract_data(capability: Capability, line: &str) -> Option<serde_json::Value> {
    match capability {
        Capability::HttpClient => HTTP_DATA.captures(line).map(|c| {
            let mut obj = serde_json::Map::new();
            obj.insert("method".into(), c[1].to_uppercase().into());
            obj.insert("url".into(), c[2].to_string().into());
            if let Some(status) = c.get(3) {
                if let Ok(code) = status.as_str().parse::<u32>() {
                    obj.insert("statusCode".into(), code.into());
                }
            }
            serde_json::Value::Object(obj)
        }),
        Capability::EvmClient => EVM_DATA.captures(line).map(|c| {
            serde_json::json!({ "callType": c[1].to_string() })
        }),
        Capability::Consensus => CONSENSUS_DATA.captures(line).map(|c| {
            serde_json::json!({ "aggregation": c[1].to_string() })
        }),
        _ => None,
    }
}

/// Result of parsing a simulator CLI's combined stdout/stderr.
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub steps: Vec<SimulationStep>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Single-pass classification of every line in `output` (§4.13, §9:
/// avoid n-squared behavior on large outputs). `output` is assumed
/// already capped to 2 MB by the caller before this runs.
pub fn parse_trace(output: &str) -> ParsedTrace {
    let mut trace = ParsedTrace::default();
    let mut step_no = 0u32;

    for line in output.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(rule) = PATTERN_RULES.iter().find(|r| r.prefix.is_match(trimmed)) {
            step_no += 1;
            trace.steps.push(SimulationStep {
                step: step_no,
                action: trimmed.to_string(),
                capability: rule.capability,
                status: status_for(trimmed),
                data: extract_data(rule.capability, trimmed),
                duration_ms: extract_duration_ms(trimmed),
            });
            continue;
        }

        if ERROR_PREFIX.is_match(trimmed) {
            trace.errors.push(trimmed.to_string());
            continue;
        }

        if WARNING_PREFIX.is_match(trimmed) {
            trace.warnings.push(trimmed.to_string());
            continue;
        }

        if is_noise(trimmed) {
            continue;
        }

        if trimmed.len() >= MEANINGFUL_MIN_LEN {
            step_no += 1;
            let mut action = trimmed.to_string();
            action.truncate(ACTION_TRUNCATE_LEN);
            trace.steps.push(SimulationStep {
                step: step_no,
                action,
                capability: Capability::Unknown,
                status: status_for(trimmed),
                data: None,
                duration_ms: extract_duration_ms(trimmed),
            });
        }
    }

    trace
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
