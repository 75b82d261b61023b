//! `SimulationStep`/`SimulationResult` — output of the sandbox (C13)
//! and trace parser (C14).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    Trigger,
    #[serde(rename = "HTTPClient")]
    HttpClient,
    #[serde(rename = "EVMClient")]
    EvmClient,
    Consensus,
    RunInNodeMode,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Success,
    Error,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub step: u32,
    pub action: String,
    pub capability: Capability,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub success: bool,
    pub steps: Vec<SimulationStep>,
    pub total_duration_ms: u64,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Capped raw combined stdout+stderr, see `forge-sandbox`.
    pub raw_output: String,
}

impl SimulationResult {
    /// §4.12 success rule: `exit_code == 0 AND parsed.errors.empty`.
    /// `forge-sandbox` is responsible for folding the exit code into
    /// `errors` before constructing this, so callers only need check
    /// `errors.is_empty()` alongside the exit status they already know.
    pub fn from_parts(
        exit_success: bool,
        steps: Vec<SimulationStep>,
        errors: Vec<String>,
        warnings: Vec<String>,
        total_duration_ms: u64,
        raw_output: String,
    ) -> Self {
        Self {
            success: exit_success && errors.is_empty(),
            steps,
            total_duration_ms,
            errors,
            warnings,
            raw_output,
        }
    }
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
