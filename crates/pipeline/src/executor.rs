//! C17 — the pipeline executor. Position-grouped DAG run: steps that
//! share a `position` execute in parallel, positions run in ascending
//! order with a happens-before edge between groups (§4.15).

use crate::metrics::Metrics;
use crate::schema::coerce_value;
use async_trait::async_trait;
use forge_core::{
    Clock, ErrorCode, EventType, ForgeError, IdGen, InputSource, PipelineExecution,
    PipelineExecutionId, PipelineId, PipelineRecord, PipelineStatus, PipelineStepConfig, RestrictedSchema,
    SimulationResult, StepId, StepResult, Workflow, WorkflowId,
};
use forge_eventbus::EventBus;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::warn;

pub const PIPELINE_TIMEOUT_MS: i64 = 300_000;
pub const STEP_TIMEOUT_MS: i64 = 60_000;
pub const STEP_RETRY_DELAY_MS: i64 = 2_000;
pub const MIN_RETRY_BUDGET_MS: i64 = 5_000;
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    pub pipeline_timeout_ms: i64,
    pub step_timeout_ms: i64,
    pub step_retry_delay_ms: i64,
    pub min_retry_budget_ms: i64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            pipeline_timeout_ms: PIPELINE_TIMEOUT_MS,
            step_timeout_ms: STEP_TIMEOUT_MS,
            step_retry_delay_ms: STEP_RETRY_DELAY_MS,
            min_retry_budget_ms: MIN_RETRY_BUDGET_MS,
        }
    }
}

/// Storage collaborator the executor depends on; `forge-storage`
/// supplies the real implementation.
#[async_trait]
pub trait PipelineStore: Send + Sync {
    async fn load_pipeline(&self, id: &PipelineId) -> Result<Option<PipelineRecord>, ForgeError>;
    async fn load_workflows(
        &self,
        ids: &[WorkflowId],
    ) -> Result<HashMap<WorkflowId, Workflow>, ForgeError>;

    /// The durable, *awaited* final status transition (§4.15 step 8,
    /// §9 durable-first note): this write must not be lost.
    async fn finalize_execution(
        &self,
        id: &PipelineExecutionId,
        status: PipelineStatus,
        step_results: Vec<StepResult>,
        final_output: Option<Value>,
        duration_ms: u64,
    ) -> Result<(), ForgeError>;

    async fn create_execution(&self, execution: &PipelineExecution) -> Result<(), ForgeError>;

    /// Advisory, fire-and-forget counters; losing this update is
    /// acceptable (§9).
    async fn bump_execution_count(&self, pipeline_id: &PipelineId);
}

/// A single workflow invocation, as the sandbox would perform it. The
/// executor takes the simulation semaphore only indirectly, through
/// whatever implementation wraps a `forge_sandbox::Sandbox` here
/// (§5): the executor itself never acquires it.
#[async_trait]
pub trait WorkflowRunner: Send + Sync {
    async fn run(
        &self,
        workflow: &Workflow,
        input: &Value,
    ) -> Result<SimulationResult, ForgeError>;
}

#[derive(Clone)]
pub struct PipelineExecutor<C: Clock, G: IdGen> {
    store: Arc<dyn PipelineStore>,
    runner: Arc<dyn WorkflowRunner>,
    events: EventBus,
    clock: C,
    id_gen: G,
    config: ExecutorConfig,
    metrics: Metrics,
}

impl<C: Clock, G: IdGen + 'static> PipelineExecutor<C, G> {
    pub fn new(
        store: Arc<dyn PipelineStore>,
        runner: Arc<dyn WorkflowRunner>,
        events: EventBus,
        clock: C,
        id_gen: G,
        config: ExecutorConfig,
    ) -> Self {
        Self { store, runner, events, clock, id_gen, config, metrics: Metrics::new() }
    }

    /// Attach a shared `Metrics` instance (C18) so counters accumulate
    /// across every pipeline this executor runs, instead of each
    /// executor owning its own isolated set.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Run a pipeline to completion (§4.15). The deadline clock starts
    /// right after the pipeline is loaded, before the work plan is
    /// built (§9 open question: retained as-is; slow bookkeeping can
    /// eat into a step's effective budget).
    pub async fn execute(
        &self,
        pipeline_id: &PipelineId,
        trigger_input: Value,
    ) -> Result<PipelineExecution, ForgeError> {
        let started_at_ms = self.clock.now_ms();

        let record = self
            .store
            .load_pipeline(pipeline_id)
            .await?
            .ok_or_else(|| ForgeError::new(ErrorCode::PipelineNotFound, "pipeline not found"))?;
        if !record.active {
            return Err(ForgeError::new(ErrorCode::PipelineDeactivated, "pipeline is deactivated"));
        }

        let deadline_ms = started_at_ms + self.config.pipeline_timeout_ms;

        let execution_id = PipelineExecutionId::new(self.id_gen.next());
        let mut execution = PipelineExecution {
            id: execution_id.clone(),
            pipeline_id: pipeline_id.clone(),
            status: PipelineStatus::Running,
            step_results: Vec::new(),
            trigger_input: trigger_input.clone(),
            final_output: None,
            duration_ms: 0,
            created_at: String::new(),
        };
        self.store.create_execution(&execution).await?;
        self.emit(EventType::PipelineStarted, serde_json::json!({
            "pipelineId": pipeline_id.as_str(),
            "executionId": execution_id.as_str(),
        }))
        .await;

        let run_result = self
            .run_body(&record, &trigger_input, deadline_ms, &execution_id, pipeline_id)
            .await;

        let (step_results, final_output) = match run_result {
            Ok(v) => v,
            Err(e) => {
                // Safety net (§4.15 step 10): best-effort failure
                // update, then re-raise.
                let elapsed = (self.clock.now_ms() - started_at_ms).max(0) as u64;
                let _ = self
                    .store
                    .finalize_execution(&execution_id, PipelineStatus::Failed, Vec::new(), None, elapsed)
                    .await;
                self.metrics.record_execution(PipelineStatus::Failed, elapsed);
                return Err(e);
            }
        };

        let status = PipelineExecution::status_from_results(&step_results);
        let duration_ms = (self.clock.now_ms() - started_at_ms).max(0) as u64;

        self.store
            .finalize_execution(&execution_id, status, step_results.clone(), final_output.clone(), duration_ms)
            .await?;
        self.metrics.record_execution(status, duration_ms);

        // Advisory counters: fire-and-forget, never awaited for
        // correctness (§9).
        {
            let store = Arc::clone(&self.store);
            let pipeline_id = pipeline_id.clone();
            tokio::spawn(async move {
                store.bump_execution_count(&pipeline_id).await;
            });
        }

        let terminal = if status == PipelineStatus::Failed {
            EventType::PipelineFailed
        } else {
            EventType::PipelineCompleted
        };
        self.emit(terminal, serde_json::json!({
            "pipelineId": pipeline_id.as_str(),
            "executionId": execution_id.as_str(),
            "status": status_tag(status),
        }))
        .await;

        execution.status = status;
        execution.step_results = step_results;
        execution.final_output = final_output;
        execution.duration_ms = duration_ms;
        Ok(execution)
    }

    async fn emit(&self, event_type: EventType, data: Value) {
        if let Err(e) = self.events.emit(event_type, data, false).await {
            warn!(error = %e, "failed to emit pipeline event");
        }
    }

    /// Steps 3-9 of §4.15: build the work plan, run each position
    /// group, and return the accumulated step results plus the final
    /// output. Anything this returns `Err` for is caught by the
    /// caller's safety net.
    async fn run_body(
        &self,
        record: &PipelineRecord,
        trigger_input: &Value,
        deadline_ms: i64,
        execution_id: &PipelineExecutionId,
        pipeline_id: &PipelineId,
    ) -> Result<(Vec<StepResult>, Option<Value>), ForgeError> {
        let mut steps = record.steps.clone();
        steps.sort_by_key(|s| s.position);
        let mut groups: Vec<(u32, Vec<PipelineStepConfig>)> = Vec::new();
        for step in steps {
            match groups.last_mut() {
                Some((pos, g)) if *pos == step.position => g.push(step),
                _ => groups.push((step.position, vec![step])),
            }
        }

        let workflow_ids: Vec<WorkflowId> = groups
            .iter()
            .flat_map(|(_, g)| g.iter().map(|s| s.workflow_id.clone()))
            .collect();
        let workflows = self.store.load_workflows(&workflow_ids).await?;

        let step_outputs: Arc<Mutex<HashMap<StepId, Value>>> = Arc::new(Mutex::new(HashMap::new()));
        let mut all_results: Vec<StepResult> = Vec::new();
        let mut last_success_output: Option<Value> = None;
        let mut failed = false;

        for (_, group) in &groups {
            if failed || self.clock.now_ms() >= deadline_ms {
                failed = true;
                break;
            }

            let mut join_set: JoinSet<StepResult> = JoinSet::new();
            for step in group {
                let workflow = workflows.get(&step.workflow_id).cloned();
                let step = step.clone();
                let step_outputs = Arc::clone(&step_outputs);
                let execution_id = execution_id.clone();
                let pipeline_id = pipeline_id.clone();
                let trigger_input = trigger_input.clone();
                let executor = self.clone();
                join_set.spawn(async move {
                    executor
                        .emit(EventType::PipelineStepStarted, serde_json::json!({
                            "pipelineId": pipeline_id.as_str(),
                            "executionId": execution_id.as_str(),
                            "stepId": step.id.as_str(),
                        }))
                        .await;

                    let result = match workflow {
                        None => StepResult {
                            step_id: step.id.clone(),
                            success: false,
                            output: None,
                            error: Some("referenced workflow not found".to_string()),
                            attempts: 0,
                            duration_ms: 0,
                        },
                        Some(workflow) => {
                            executor
                                .execute_step(&step, &workflow, &trigger_input, &step_outputs, deadline_ms)
                                .await
                        }
                    };

                    let event_type = if result.success {
                        EventType::PipelineStepCompleted
                    } else {
                        EventType::PipelineStepFailed
                    };
                    executor
                        .emit(event_type, serde_json::json!({
                            "pipelineId": pipeline_id.as_str(),
                            "executionId": execution_id.as_str(),
                            "stepId": step.id.as_str(),
                            "success": result.success,
                        }))
                        .await;

                    result
                });
            }

            let mut group_results: Vec<StepResult> = Vec::new();
            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok(result) => group_results.push(result),
                    Err(join_err) => {
                        warn!(error = %join_err, "pipeline step task panicked");
                    }
                }
            }

            for r in &group_results {
                if r.success {
                    last_success_output = r.output.clone();
                } else {
                    failed = true;
                }
            }
            all_results.extend(group_results);

            if failed {
                break;
            }
        }

        let final_output = if failed && all_results.iter().all(|r| !r.success) {
            None
        } else {
            last_success_output
        };

        Ok((all_results, final_output))
    }

    async fn execute_step(
        &self,
        step: &PipelineStepConfig,
        workflow: &Workflow,
        trigger_input: &Value,
        step_outputs: &Arc<Mutex<HashMap<StepId, Value>>>,
        deadline_ms: i64,
    ) -> StepResult {
        let started = self.clock.now_ms();
        let mut attempts = 0u32;
        let mut last_error = String::new();

        loop {
            attempts += 1;
            let now = self.clock.now_ms();
            let remaining_ms = deadline_ms - now;
            if remaining_ms <= 0 {
                last_error = "pipeline deadline exceeded".to_string();
                break;
            }

            let input = {
                let outputs = step_outputs.lock();
                compute_step_input(trigger_input, &outputs, step, workflow.input_schema.as_ref())
            };
            let merged = merge_with_defaults(&workflow.config, &input);

            let per_call_ms = remaining_ms.min(self.config.step_timeout_ms) as u64;
            let run = tokio::time::timeout(
                Duration::from_millis(per_call_ms),
                self.runner.run(workflow, &merged),
            )
            .await;

            match run {
                Err(_elapsed) => last_error = "step timed out".to_string(),
                Ok(Err(e)) => last_error = e.to_string(),
                Ok(Ok(sim)) if sim.success => {
                    let output = synthesize_output(workflow.output_schema.as_ref());
                    step_outputs.lock().insert(step.id.clone(), output.clone());
                    return StepResult {
                        step_id: step.id.clone(),
                        success: true,
                        output: Some(output),
                        error: None,
                        attempts,
                        duration_ms: (self.clock.now_ms() - started).max(0) as u64,
                    };
                }
                Ok(Ok(sim)) => last_error = sim.errors.join("; "),
            }

            if attempts >= MAX_ATTEMPTS {
                break;
            }
            let now = self.clock.now_ms();
            let remaining_ms = deadline_ms - now;
            if remaining_ms < self.config.step_retry_delay_ms + self.config.min_retry_budget_ms {
                break;
            }
            tokio::time::sleep(Duration::from_millis(self.config.step_retry_delay_ms as u64)).await;
        }

        StepResult {
            step_id: step.id.clone(),
            success: false,
            output: None,
            error: Some(last_error),
            attempts,
            duration_ms: (self.clock.now_ms() - started).max(0) as u64,
        }
    }
}

fn status_tag(status: PipelineStatus) -> &'static str {
    match status {
        PipelineStatus::Pending => "pending",
        PipelineStatus::Running => "running",
        PipelineStatus::Completed => "completed",
        PipelineStatus::Failed => "failed",
        PipelineStatus::Partial => "partial",
    }
}

/// §4.15 step 6: resolve each mapped target field from `"trigger"` or
/// a prior step's published output, applying `coerce_value` when the
/// input schema names a different type than the resolved value's own
/// JSON type. Absent mappings forward the trigger input unchanged.
fn compute_step_input(
    trigger_input: &Value,
    step_outputs: &HashMap<StepId, Value>,
    step: &PipelineStepConfig,
    input_schema: Option<&RestrictedSchema>,
) -> Value {
    if step.input_mapping.is_empty() {
        return trigger_input.clone();
    }

    let mut obj = serde_json::Map::new();
    for (target_field, mapping) in &step.input_mapping {
        let resolved = match &mapping.source {
            InputSource::Trigger => trigger_input.get(&mapping.field).cloned(),
            InputSource::Step(id) => step_outputs.get(id).and_then(|v| v.get(&mapping.field)).cloned(),
        }
        .unwrap_or(Value::Null);

        let coerced = match input_schema.and_then(|s| s.properties.get(target_field)) {
            Some(field) if json_type_name(&resolved) != field.field_type => {
                coerce_value(&resolved, &field.field_type)
            }
            _ => resolved,
        };
        obj.insert(target_field.clone(), coerced);
    }
    Value::Object(obj)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Merge computed input over the workflow's configured defaults,
/// input taking precedence (§4.15 step 6). A non-object computed input
/// (forwarded trigger input of a non-object shape) is passed through
/// unmerged.
fn merge_with_defaults(defaults: &BTreeMap<String, Value>, computed: &Value) -> Value {
    let Value::Object(computed_obj) = computed else {
        return computed.clone();
    };
    let mut merged: serde_json::Map<String, Value> = defaults.clone().into_iter().collect();
    for (k, v) in computed_obj {
        merged.insert(k.clone(), v.clone());
    }
    Value::Object(merged)
}

/// §4.15 step 6: synthesize an output from the workflow's declared
/// output schema. Only reached on a successful simulation, so boolean
/// fields are always `true` ("simulation-success") and numeric fields
/// are the fixed placeholder `42` — see DESIGN.md for why the spec's
/// "or 0 / or false" alternative never applies here.
fn synthesize_output(schema: Option<&RestrictedSchema>) -> Value {
    let Some(schema) = schema else {
        return Value::Null;
    };
    let mut obj = serde_json::Map::new();
    for (name, field) in &schema.properties {
        let value = match field.field_type.as_str() {
            "string" => {
                let label = field.description.clone().unwrap_or_else(|| name.clone());
                Value::String(format!("{label}_value"))
            }
            "number" | "integer" => Value::from(42),
            "boolean" => Value::Bool(true),
            _ => Value::Null,
        };
        obj.insert(name.clone(), value);
    }
    Value::Object(obj)
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
