//! In-memory `Storage` implementation. §2/§6 keep storage strictly
//! trait-based with no embedded database; this is the reference impl
//! used standalone, in tests, and until a real row store is wired in.

use crate::store::{Storage, StorageError};
use async_trait::async_trait;
use forge_core::{
    DeployStatus, Event, EventId, EventType, PipelineExecution, PipelineExecutionId, PipelineId,
    PipelineRecord, PipelineStatus, StepResult, Workflow, WorkflowId,
};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Default)]
struct Rows {
    workflows: HashMap<WorkflowId, Workflow>,
    pipelines: HashMap<PipelineId, PipelineRecord>,
    pipeline_executions: HashMap<PipelineExecutionId, PipelineExecution>,
    events: Vec<Event>,
}

#[derive(Default)]
pub struct InMemoryStorage {
    rows: Mutex<Rows>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a pipeline record directly; pipelines have no create
    /// endpoint in §6, they're provisioned out of band.
    pub fn seed_pipeline(&self, record: PipelineRecord) {
        self.rows.lock().pipelines.insert(record.id.clone(), record);
    }

    #[cfg(test)]
    pub(crate) async fn get_pipeline_execution_for_test(
        &self,
        id: &PipelineExecutionId,
    ) -> PipelineExecution {
        self.rows
            .lock()
            .pipeline_executions
            .get(id)
            .cloned()
            .expect("pipeline execution must exist")
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn get_workflow(&self, id: &WorkflowId) -> Result<Option<Workflow>, StorageError> {
        Ok(self.rows.lock().workflows.get(id).cloned())
    }

    async fn get_workflows(
        &self,
        ids: &[WorkflowId],
    ) -> Result<HashMap<WorkflowId, Workflow>, StorageError> {
        let rows = self.rows.lock();
        Ok(ids
            .iter()
            .filter_map(|id| rows.workflows.get(id).map(|w| (id.clone(), w.clone())))
            .collect())
    }

    async fn put_workflow(&self, workflow: Workflow) -> Result<(), StorageError> {
        self.rows.lock().workflows.insert(workflow.id.clone(), workflow);
        Ok(())
    }

    async fn pending_workflows_older_than(
        &self,
        cutoff: &str,
        limit: usize,
    ) -> Result<Vec<WorkflowId>, StorageError> {
        let rows = self.rows.lock();
        Ok(rows
            .workflows
            .values()
            .filter(|w| w.deploy_status == DeployStatus::Pending && w.updated_at.as_str() < cutoff)
            .take(limit)
            .map(|w| w.id.clone())
            .collect())
    }

    async fn mark_workflow_failed(&self, id: &WorkflowId) -> Result<(), StorageError> {
        if let Some(w) = self.rows.lock().workflows.get_mut(id) {
            w.deploy_status = DeployStatus::Failed;
        }
        Ok(())
    }

    async fn get_pipeline(&self, id: &PipelineId) -> Result<Option<PipelineRecord>, StorageError> {
        Ok(self.rows.lock().pipelines.get(id).cloned())
    }

    async fn increment_pipeline_execution_count(&self, id: &PipelineId) -> Result<(), StorageError> {
        if let Some(p) = self.rows.lock().pipelines.get_mut(id) {
            p.execution_count += 1;
        }
        Ok(())
    }

    async fn create_pipeline_execution(
        &self,
        execution: &PipelineExecution,
    ) -> Result<(), StorageError> {
        self.rows
            .lock()
            .pipeline_executions
            .insert(execution.id.clone(), execution.clone());
        Ok(())
    }

    async fn finalize_pipeline_execution(
        &self,
        id: &PipelineExecutionId,
        status: PipelineStatus,
        step_results: Vec<StepResult>,
        final_output: Option<serde_json::Value>,
        duration_ms: u64,
    ) -> Result<(), StorageError> {
        let mut rows = self.rows.lock();
        let execution = rows.pipeline_executions.get_mut(id).ok_or_else(|| {
            StorageError::WriteFailed(format!("no such pipeline execution: {id}"))
        })?;
        execution.status = status;
        execution.step_results = step_results;
        execution.final_output = final_output;
        execution.duration_ms = duration_ms;
        Ok(())
    }

    async fn running_pipeline_executions_older_than(
        &self,
        cutoff: &str,
        limit: usize,
    ) -> Result<Vec<PipelineExecutionId>, StorageError> {
        let rows = self.rows.lock();
        Ok(rows
            .pipeline_executions
            .values()
            .filter(|e| e.status == PipelineStatus::Running && e.created_at.as_str() < cutoff)
            .take(limit)
            .map(|e| e.id.clone())
            .collect())
    }

    async fn mark_pipeline_execution_failed(
        &self,
        id: &PipelineExecutionId,
    ) -> Result<(), StorageError> {
        if let Some(e) = self.rows.lock().pipeline_executions.get_mut(id) {
            e.status = PipelineStatus::Failed;
        }
        Ok(())
    }

    async fn append_event(
        &self,
        event_type: EventType,
        data: serde_json::Value,
    ) -> Result<EventId, StorageError> {
        let mut rows = self.rows.lock();
        let id = rows.events.last().map(|e| e.id).unwrap_or(0) + 1;
        rows.events.push(Event {
            id,
            event_type,
            data,
            created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        Ok(id)
    }

    async fn events_after(&self, after: EventId, limit: usize) -> Result<Vec<Event>, StorageError> {
        let rows = self.rows.lock();
        Ok(rows.events.iter().filter(|e| e.id > after).take(limit).cloned().collect())
    }

    async fn max_event_id(&self) -> Result<EventId, StorageError> {
        Ok(self.rows.lock().events.last().map(|e| e.id).unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
