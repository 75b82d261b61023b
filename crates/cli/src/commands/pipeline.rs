//! `forge pipeline` — §6 `/pipelines` family. Pipelines are
//! provisioned out of band (§9), so `create` seeds storage directly
//! instead of exercising a generation path.

use super::print_json;
use forge_core::{
    ErrorCode, ForgeError, IdGen, PipelineId, PipelineRecord, PipelineStepConfig, RestrictedSchema,
    UuidIdGen,
};
use forge_daemon::App;
use forge_pipeline::check_schema_compatibility;
use forge_service::{ExecutionResponse, PipelineResponse};
use forge_storage::Storage;
use std::path::Path;

pub async fn create(app: &App, steps_path: &Path, active: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(steps_path)?;
    let steps: Vec<PipelineStepConfig> = serde_json::from_str(&text)?;

    let record = PipelineRecord {
        id: PipelineId::new(UuidIdGen.next()),
        steps,
        active,
        execution_count: 0,
    };
    app.storage.seed_pipeline(record.clone());
    print_json(&PipelineResponse::from(record))
}

pub async fn execute(app: &App, pipeline_id: &str, input_path: Option<std::path::PathBuf>) -> anyhow::Result<()> {
    let trigger_input = match input_path {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        None => serde_json::json!({}),
    };
    let execution = app
        .pipeline
        .execute(&PipelineId::new(pipeline_id), trigger_input)
        .await?;
    print_json(&ExecutionResponse::from(execution))
}

/// `forge pipeline check-compatibility` — §6
/// `POST /pipelines/check-compatibility`, a standalone entrypoint into
/// the schema checker (C15) independent of executing a pipeline
/// (SPEC_FULL §2).
pub fn check_compatibility(output_schema_path: &Path, input_schema_path: &Path) -> anyhow::Result<()> {
    let output_schema: RestrictedSchema =
        serde_json::from_str(&std::fs::read_to_string(output_schema_path)?)?;
    let input_schema: RestrictedSchema =
        serde_json::from_str(&std::fs::read_to_string(input_schema_path)?)?;
    print_json(&check_schema_compatibility(&output_schema, &input_schema))
}

pub async fn show(app: &App, pipeline_id: &str) -> anyhow::Result<()> {
    let record = app
        .storage
        .get_pipeline(&PipelineId::new(pipeline_id))
        .await?
        .ok_or_else(|| ForgeError::new(ErrorCode::PipelineNotFound, "pipeline not found"))?;
    print_json(&PipelineResponse::from(record))
}
