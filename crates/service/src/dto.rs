//! Request/response shapes for the §6 external interface. These are
//! deliberately separate from the `forge-core` entity types: the core
//! models what storage persists, these model what a caller sends and
//! receives over the wire (camelCase, per the endpoint examples).

use forge_core::{
    GeneratedCode, GenerateResult, ParsedIntent, PipelineExecution, PipelineId, PipelineRecord,
    PipelineStatus, PipelineStepConfig, TemplateMatch, ValidationResult, WorkflowId,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub template_hint: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub workflow_id: WorkflowId,
    pub code: GeneratedCode,
    pub validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateMatch>,
    pub intent: ParsedIntent,
    pub fallback: bool,
}

impl From<GenerateResult> for GenerateResponse {
    fn from(r: GenerateResult) -> Self {
        Self {
            workflow_id: r.workflow_id,
            code: r.code,
            validation: r.validation,
            template: r.template,
            intent: r.intent,
            fallback: r.fallback,
        }
    }
}

/// §6: `/simulate` has two modes, distinguished by `mode`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SimulateRequest {
    Stored {
        #[serde(rename = "workflowId")]
        workflow_id: WorkflowId,
        #[serde(default)]
        config: Option<Value>,
    },
    Direct {
        code: String,
        config: Value,
    },
}

/// Hard cap on `direct` mode source size (§6).
pub const DIRECT_CODE_CAP_BYTES: usize = 50 * 1024;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulateResponse {
    pub success: bool,
    pub trace: Vec<forge_core::SimulationStep>,
    pub duration: u64,
    pub workflow_id: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipelineRequest {
    pub steps: Vec<PipelineStepConfig>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePipelineRequest {
    #[serde(default)]
    pub steps: Option<Vec<PipelineStepConfig>>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResponse {
    pub id: PipelineId,
    pub steps: Vec<PipelineStepConfig>,
    pub active: bool,
    pub execution_count: u64,
}

impl From<PipelineRecord> for PipelineResponse {
    fn from(p: PipelineRecord) -> Self {
        Self {
            id: p.id,
            steps: p.steps,
            active: p.active,
            execution_count: p.execution_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResponse {
    pub id: String,
    pub pipeline_id: String,
    pub status: PipelineStatus,
    pub step_results: Vec<forge_core::StepResult>,
    pub trigger_input: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_output: Option<Value>,
    pub duration_ms: u64,
    pub created_at: String,
}

impl From<PipelineExecution> for ExecutionResponse {
    fn from(e: PipelineExecution) -> Self {
        Self {
            id: e.id.as_str().to_string(),
            pipeline_id: e.pipeline_id.as_str().to_string(),
            status: e.status,
            step_results: e.step_results,
            trigger_input: e.trigger_input,
            final_output: e.final_output,
            duration_ms: e.duration_ms,
            created_at: e.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckCompatibilityRequest {
    pub output_schema: forge_core::RestrictedSchema,
    pub input_schema: forge_core::RestrictedSchema,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub db: bool,
    pub sse_clients: usize,
    pub uptime_ms: i64,
}

/// §6 error envelope: `{error: {code, message, details?}}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub error: forge_core::ForgeError,
}

impl From<forge_core::ForgeError> for ErrorEnvelope {
    fn from(error: forge_core::ForgeError) -> Self {
        Self { error }
    }
}

#[cfg(test)]
#[path = "dto_tests.rs"]
mod tests;
