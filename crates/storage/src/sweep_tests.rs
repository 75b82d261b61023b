use super::*;
use crate::memory::InMemoryStorage;
use forge_core::{DeployStatus, FakeClock, PipelineExecution, PipelineExecutionId, PipelineId, PipelineStatus, Usdc6, Workflow, WorkflowId};
use std::sync::Arc;

fn workflow_at(id: &str, status: DeployStatus, updated_at: &str) -> Workflow {
    Workflow {
        id: WorkflowId::new(id),
        code: "export async function main() {}".to_string(),
        config: Default::default(),
        input_schema: None,
        output_schema: None,
        owner_address: "0xabc".to_string(),
        price: Usdc6::ZERO,
        deploy_status: status,
        published: false,
        updated_at: updated_at.to_string(),
    }
}

fn execution_at(id: &str, status: PipelineStatus, created_at: &str) -> PipelineExecution {
    PipelineExecution {
        id: PipelineExecutionId::new(id),
        pipeline_id: PipelineId::new("p1"),
        status,
        step_results: Vec::new(),
        trigger_input: serde_json::json!({}),
        final_output: None,
        duration_ms: 0,
        created_at: created_at.to_string(),
    }
}

#[tokio::test]
async fn sweep_marks_stale_pending_workflow_failed() {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    storage
        .put_workflow(workflow_at("w1", DeployStatus::Pending, "2020-01-01 00:00:00"))
        .await
        .unwrap();
    let clock = FakeClock::new(1_700_000_000_000);

    run_startup_sweep(&storage, &clock).await;

    let got = storage.get_workflow(&WorkflowId::new("w1")).await.unwrap().unwrap();
    assert_eq!(got.deploy_status, DeployStatus::Failed);
}

#[tokio::test]
async fn sweep_leaves_recently_updated_pending_workflow_alone() {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    // Give it a cutoff-relative fresh timestamp: far enough in the
    // future that it always sorts after the computed cutoff.
    storage
        .put_workflow(workflow_at("w1", DeployStatus::Pending, "2099-01-01 00:00:00"))
        .await
        .unwrap();
    let clock = FakeClock::new(1_700_000_000_000);

    run_startup_sweep(&storage, &clock).await;

    let got = storage.get_workflow(&WorkflowId::new("w1")).await.unwrap().unwrap();
    assert_eq!(got.deploy_status, DeployStatus::Pending);
}

#[tokio::test]
async fn sweep_marks_stale_running_execution_failed() {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    storage
        .create_pipeline_execution(&execution_at("e1", PipelineStatus::Running, "2020-01-01 00:00:00"))
        .await
        .unwrap();
    let clock = FakeClock::new(1_700_000_000_000);

    run_startup_sweep(&storage, &clock).await;

    let ids = storage
        .running_pipeline_executions_older_than("2099-01-01 00:00:00", SWEEP_BATCH_CAP)
        .await
        .unwrap();
    assert!(ids.is_empty(), "stale execution should have been marked failed, not left running");
}

#[tokio::test]
async fn sweep_leaves_recently_started_execution_running() {
    let storage: Arc<dyn Storage> = Arc::new(InMemoryStorage::new());
    storage
        .create_pipeline_execution(&execution_at("e1", PipelineStatus::Running, "2099-01-01 00:00:00"))
        .await
        .unwrap();
    let clock = FakeClock::new(1_700_000_000_000);

    run_startup_sweep(&storage, &clock).await;

    let ids = storage
        .running_pipeline_executions_older_than("2100-01-01 00:00:00", SWEEP_BATCH_CAP)
        .await
        .unwrap();
    assert_eq!(ids, vec![PipelineExecutionId::new("e1")]);
}

#[tokio::test]
async fn cutoff_timestamp_subtracts_max_age_from_clock() {
    // 1970-01-01T00:16:40Z is 1_000_000 ms since epoch.
    let cutoff = cutoff_timestamp(1_000_000, 600_000);
    assert_eq!(cutoff, "1970-01-01 00:06:40");
}
