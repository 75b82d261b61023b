//! `forge simulate` — §6 `POST /simulate`, both `stored` and `direct`
//! modes. There is no transport here, so the two modes are plain
//! subcommands rather than a tagged request body (§6's `mode` field).

use super::print_json;
use forge_core::{ErrorCode, ForgeError, WorkflowId};
use forge_daemon::App;
use forge_service::{SimulateResponse, DIRECT_CODE_CAP_BYTES};
use forge_storage::Storage;
use std::path::Path;

pub async fn run_stored(
    app: &App,
    workflow_id: &str,
    config_path: Option<std::path::PathBuf>,
) -> anyhow::Result<()> {
    let id = WorkflowId::new(workflow_id);
    let workflow = app
        .storage
        .get_workflow(&id)
        .await?
        .ok_or_else(|| ForgeError::new(ErrorCode::WorkflowNotFound, "workflow not found"))?;

    let config = match config_path {
        Some(path) => read_json(&path)?,
        None => serde_json::Value::Object(workflow.config.clone().into_iter().collect()),
    };

    let result = app
        .sandbox
        .simulate(&workflow.code, &config, app.secret_env.clone())
        .await?;

    print_json(&SimulateResponse {
        success: result.success,
        trace: result.steps,
        duration: result.total_duration_ms,
        workflow_id: workflow_id.to_string(),
        errors: result.errors,
        warnings: result.warnings,
    })
}

pub async fn run_direct(app: &App, code_path: &Path, config_path: &Path) -> anyhow::Result<()> {
    let code = std::fs::read_to_string(code_path)?;
    if code.len() > DIRECT_CODE_CAP_BYTES {
        anyhow::bail!(
            "direct-mode source exceeds the {} KiB cap (§6)",
            DIRECT_CODE_CAP_BYTES / 1024
        );
    }
    let config = read_json(config_path)?;

    let result = app.sandbox.simulate(&code, &config, app.secret_env.clone()).await?;

    let workflow_id = format!("direct-{}", &uuid::Uuid::new_v4().simple().to_string()[..8]);
    print_json(&SimulateResponse {
        success: result.success,
        trace: result.steps,
        duration: result.total_duration_ms,
        workflow_id,
        errors: result.errors,
        warnings: result.warnings,
    })
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
