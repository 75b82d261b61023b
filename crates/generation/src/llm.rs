//! C9 — code-generator adapter. `LlmClient` is the collaborator trait
//! the orchestrator (C12) depends on; a production implementation
//! lives in `forge-service`. Also hosts the red-flag self-review scan
//! (§4.8) and the reasoning-effort escalation ladder (§4.11).

use async_trait::async_trait;
use forge_core::{ErrorCode, ForgeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    /// §4.11: each retry bumps the effort one rung, capping at `High`.
    pub fn escalate(self) -> Self {
        match self {
            ReasoningEffort::Low => ReasoningEffort::Medium,
            ReasoningEffort::Medium | ReasoningEffort::High => ReasoningEffort::High,
        }
    }
}

impl Default for ReasoningEffort {
    fn default() -> Self {
        ReasoningEffort::Low
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub effort: ReasoningEffort,
}

/// The six structured-output fields the model is asked to return
/// (§4.7 output instructions).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub reasoning: String,
    pub code: String,
    pub config: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_contract: Option<String>,
    pub self_review: String,
    pub explanation: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_code(&self, request: GenerationRequest) -> Result<LlmResponse, ForgeError>;
}

/// §4.8: a negative-sentiment word paired with a violation keyword
/// inside `self_review`, or one of the self-triggering phrases
/// (`None` sentiment list), flags the response for an internal retry.
/// Each entry's sentiment list is `None` when the phrase alone is
/// damning regardless of surrounding words.
struct RedFlag {
    violation: &'static str,
    sentiment: Option<&'static [&'static str]>,
}

const NEGATIVE_SENTIMENT: &[&str] = &[
    "missing", "forgot", "incomplete", "wrong", "incorrect", "broken", "fails", "failed",
    "doesn't", "does not", "cannot", "unable", "todo", "placeholder", "mistake",
];

const RED_FLAGS: &[RedFlag] = &[
    RedFlag { violation: "async", sentiment: Some(NEGATIVE_SENTIMENT) },
    RedFlag { violation: "await", sentiment: Some(NEGATIVE_SENTIMENT) },
    RedFlag { violation: "import", sentiment: Some(NEGATIVE_SENTIMENT) },
    RedFlag { violation: "main", sentiment: Some(NEGATIVE_SENTIMENT) },
    RedFlag { violation: "config", sentiment: Some(NEGATIVE_SENTIMENT) },
    RedFlag { violation: "missing main", sentiment: None },
    RedFlag { violation: "no main function", sentiment: None },
    RedFlag { violation: "forgot to export", sentiment: None },
];

/// Returns the first red flag's description, if any, for use as the
/// next retry's "previous error" context.
pub fn scan_self_review(self_review: &str) -> Option<String> {
    let lower = self_review.to_lowercase();
    for flag in RED_FLAGS {
        match flag.sentiment {
            None => {
                if lower.contains(flag.violation) {
                    return Some(format!("self-review admitted: \"{}\"", flag.violation));
                }
            }
            Some(words) => {
                if lower.contains(flag.violation) && words.iter().any(|w| lower.contains(w)) {
                    return Some(format!(
                        "self-review raised a concern about \"{}\"",
                        flag.violation
                    ));
                }
            }
        }
    }
    None
}

pub fn parse_config(raw: &str) -> Result<BTreeMap<String, serde_json::Value>, ForgeError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        ForgeError::new(ErrorCode::InvalidInput, format!("config is not valid JSON: {e}"))
    })?;
    match value {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(ForgeError::new(
            ErrorCode::InvalidInput,
            "config must parse to a JSON object",
        )),
    }
}

#[cfg(test)]
#[path = "llm_tests.rs"]
mod tests;
