//! Bridges `Arc<dyn Storage>` into the narrow collaborator traits each
//! core crate actually depends on, so `forge-generation`,
//! `forge-pipeline`, and `forge-eventbus` stay ignorant of how rows are
//! persisted (§3 "Ownership and lifetimes").

use crate::store::{Storage, StorageError};
use async_trait::async_trait;
use forge_core::{
    Event, EventId, EventType, ErrorCode, ForgeError, PipelineExecution, PipelineExecutionId,
    PipelineId, PipelineRecord, PipelineStatus, StepResult, Workflow, WorkflowId,
};
use forge_eventbus::{DurableLog, DurableLogError};
use forge_generation::WorkflowStore;
use forge_pipeline::PipelineStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

fn to_forge_error(err: StorageError) -> ForgeError {
    ForgeError::new(ErrorCode::InternalError, err.to_string())
}

fn to_durable_log_error(err: StorageError) -> DurableLogError {
    match err {
        StorageError::ReadFailed(msg) => DurableLogError::ReadFailed(msg),
        StorageError::WriteFailed(msg) => DurableLogError::WriteFailed(msg),
        StorageError::Unreachable(msg) => DurableLogError::ReadFailed(msg),
    }
}

/// Adapts `Storage` to `forge_generation::WorkflowStore` — C12's only
/// persistence need is "save the generated workflow".
pub struct StorageWorkflowStore {
    storage: Arc<dyn Storage>,
}

impl StorageWorkflowStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl WorkflowStore for StorageWorkflowStore {
    async fn save(&self, workflow: Workflow) -> Result<(), ForgeError> {
        self.storage.put_workflow(workflow).await.map_err(to_forge_error)
    }
}

/// Adapts `Storage` to `forge_pipeline::PipelineStore`.
pub struct StoragePipelineStore {
    storage: Arc<dyn Storage>,
}

impl StoragePipelineStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PipelineStore for StoragePipelineStore {
    async fn load_pipeline(&self, id: &PipelineId) -> Result<Option<PipelineRecord>, ForgeError> {
        self.storage.get_pipeline(id).await.map_err(to_forge_error)
    }

    async fn load_workflows(
        &self,
        ids: &[WorkflowId],
    ) -> Result<HashMap<WorkflowId, Workflow>, ForgeError> {
        self.storage.get_workflows(ids).await.map_err(to_forge_error)
    }

    async fn finalize_execution(
        &self,
        id: &PipelineExecutionId,
        status: PipelineStatus,
        step_results: Vec<StepResult>,
        final_output: Option<serde_json::Value>,
        duration_ms: u64,
    ) -> Result<(), ForgeError> {
        self.storage
            .finalize_pipeline_execution(id, status, step_results, final_output, duration_ms)
            .await
            .map_err(to_forge_error)
    }

    async fn create_execution(&self, execution: &PipelineExecution) -> Result<(), ForgeError> {
        self.storage.create_pipeline_execution(execution).await.map_err(to_forge_error)
    }

    /// Advisory bump, per §4.15 step 9 — a miscounted `execution_count`
    /// never affects correctness, so failures are logged and swallowed
    /// rather than propagated to the executor.
    async fn bump_execution_count(&self, pipeline_id: &PipelineId) {
        if let Err(err) = self.storage.increment_pipeline_execution_count(pipeline_id).await {
            warn!(%pipeline_id, error = %err, "failed to bump pipeline execution count");
        }
    }
}

/// Adapts `Storage` to `forge_eventbus::DurableLog`.
pub struct StorageDurableLog {
    storage: Arc<dyn Storage>,
}

impl StorageDurableLog {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl DurableLog for StorageDurableLog {
    async fn append(
        &self,
        event_type: EventType,
        data: serde_json::Value,
    ) -> Result<EventId, DurableLogError> {
        self.storage.append_event(event_type, data).await.map_err(to_durable_log_error)
    }

    async fn read_after(&self, after: EventId, limit: usize) -> Result<Vec<Event>, DurableLogError> {
        self.storage.events_after(after, limit).await.map_err(to_durable_log_error)
    }

    async fn max_id(&self) -> Result<EventId, DurableLogError> {
        self.storage.max_event_id().await.map_err(to_durable_log_error)
    }
}

#[cfg(test)]
#[path = "adapters_tests.rs"]
mod tests;
