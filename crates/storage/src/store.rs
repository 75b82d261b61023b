//! `Storage` — the opaque key/row store boundary (§3, §6). The core
//! treats relational storage as an external collaborator; this trait
//! is the seam, with columns matching the tables named in §6: workflows,
//! pipelines, pipeline_executions, events.

use async_trait::async_trait;
use forge_core::{
    Event, EventId, EventType, PipelineExecution, PipelineExecutionId, PipelineId, PipelineRecord,
    PipelineStatus, StepResult, Workflow, WorkflowId,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
    #[error("storage unreachable: {0}")]
    Unreachable(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_workflow(&self, id: &WorkflowId) -> Result<Option<Workflow>, StorageError>;

    async fn get_workflows(
        &self,
        ids: &[WorkflowId],
    ) -> Result<HashMap<WorkflowId, Workflow>, StorageError>;

    async fn put_workflow(&self, workflow: Workflow) -> Result<(), StorageError>;

    /// Ids of workflows with `deploy_status = "pending"` and `updated_at`
    /// lexicographically less than `cutoff` (a space-separated
    /// SQLite-compatible timestamp, per §6), capped at `limit` rows.
    async fn pending_workflows_older_than(
        &self,
        cutoff: &str,
        limit: usize,
    ) -> Result<Vec<WorkflowId>, StorageError>;

    async fn mark_workflow_failed(&self, id: &WorkflowId) -> Result<(), StorageError>;

    async fn get_pipeline(&self, id: &PipelineId) -> Result<Option<PipelineRecord>, StorageError>;

    async fn increment_pipeline_execution_count(&self, id: &PipelineId) -> Result<(), StorageError>;

    async fn create_pipeline_execution(
        &self,
        execution: &PipelineExecution,
    ) -> Result<(), StorageError>;

    async fn finalize_pipeline_execution(
        &self,
        id: &PipelineExecutionId,
        status: PipelineStatus,
        step_results: Vec<StepResult>,
        final_output: Option<serde_json::Value>,
        duration_ms: u64,
    ) -> Result<(), StorageError>;

    /// Ids of pipeline executions with `status = "running"` and
    /// `created_at` lexicographically less than `cutoff`, capped at
    /// `limit` rows.
    async fn running_pipeline_executions_older_than(
        &self,
        cutoff: &str,
        limit: usize,
    ) -> Result<Vec<PipelineExecutionId>, StorageError>;

    async fn mark_pipeline_execution_failed(
        &self,
        id: &PipelineExecutionId,
    ) -> Result<(), StorageError>;

    async fn append_event(
        &self,
        event_type: EventType,
        data: serde_json::Value,
    ) -> Result<EventId, StorageError>;

    async fn events_after(&self, after: EventId, limit: usize) -> Result<Vec<Event>, StorageError>;

    async fn max_event_id(&self) -> Result<EventId, StorageError>;

    /// Cheap reachability probe backing `GET /health` (§6).
    async fn ping(&self) -> Result<(), StorageError>;
}
