//! Pipeline configuration and execution entities (§3), consumed by the
//! executor (C17) in `forge-pipeline`.

use crate::workflow::WorkflowId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

crate::define_id! {
    pub struct PipelineId;
}

crate::define_id! {
    pub struct PipelineExecutionId;
}

crate::define_id! {
    pub struct StepId;
}

/// Where a step's input field is sourced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    Trigger,
    Step(StepId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMapping {
    pub source: InputSource,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineStepConfig {
    pub id: StepId,
    pub workflow_id: WorkflowId,
    pub position: u32,
    #[serde(default)]
    pub input_mapping: BTreeMap<String, InputMapping>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Partial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: StepId,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attempts: u32,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineExecution {
    pub id: PipelineExecutionId,
    pub pipeline_id: PipelineId,
    pub status: PipelineStatus,
    pub step_results: Vec<StepResult>,
    pub trigger_input: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_output: Option<serde_json::Value>,
    pub duration_ms: u64,
    pub created_at: String,
}

/// The pipeline aggregate the executor (C17) loads before building a
/// work plan: ordered step configs plus the activation flag that
/// gates `PIPELINE_DEACTIVATED` (§4.15 step 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRecord {
    pub id: PipelineId,
    pub steps: Vec<PipelineStepConfig>,
    pub active: bool,
    pub execution_count: u64,
}

impl PipelineExecution {
    /// §8 property 6: status well-formedness derived from step results.
    pub fn status_from_results(results: &[StepResult]) -> PipelineStatus {
        if results.is_empty() {
            return PipelineStatus::Failed;
        }
        let succeeded = results.iter().filter(|r| r.success).count();
        if succeeded == results.len() {
            PipelineStatus::Completed
        } else if succeeded == 0 {
            PipelineStatus::Failed
        } else {
            PipelineStatus::Partial
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
