//! forge-daemon: process entrypoint wiring. `App` assembles every
//! collaborator crate (storage, event bus, generation orchestrator,
//! sandbox, pipeline executor, metrics) behind the production
//! subprocess-backed implementations in `forge-service`, the same role
//! the donor's `oj-daemon::lifecycle` module plays for its engine —
//! minus a socket listener, since HTTP/IPC routing is out of scope
//! here (§1 "Out of scope").

pub mod env;

use forge_core::{SystemClock, UuidIdGen};
use forge_eventbus::EventBus;
use forge_generation::{GenerationConfig, GenerationOrchestrator};
use forge_pipeline::{ExecutorConfig, Metrics, PipelineExecutor};
use forge_sandbox::{secret_env, Sandbox};
use forge_service::{CliLlmClient, CliProcessRunner, CliTypeChecker, SandboxWorkflowRunner, SuggestCache};
use forge_storage::{InMemoryStorage, Storage, StorageDurableLog, StoragePipelineStore, StorageWorkflowStore};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Command the production `LlmClient` shells out to. Not part of the
/// closed §6 env var set (the LLM provider SDK is an external
/// collaborator, specified only by interface); a deployment overrides
/// it by putting its own `forge-llm` on `PATH`.
const LLM_COMMAND: &str = "forge-llm";
/// Command the production `[TSC]` stage shells out to (§4.10).
const TSC_COMMAND: &str = "tsc";

pub type Orchestrator = GenerationOrchestrator<SystemClock, UuidIdGen>;
pub type Executor = PipelineExecutor<SystemClock, UuidIdGen>;

/// Everything the (not-yet-written) transport layer would need a
/// handle to, assembled once at process start.
#[derive(Clone)]
pub struct App {
    /// Concrete, not `Arc<dyn Storage>`: the reference in-memory store
    /// is the only `Storage` impl this workspace ships (implementing
    /// SQL is a Non-goal, §1), and `forge-cli` needs the concrete type
    /// to seed pipelines out of band (§6 "pipelines have no create
    /// endpoint... provisioned out of band").
    pub storage: Arc<InMemoryStorage>,
    pub events: EventBus,
    pub generation: Arc<Orchestrator>,
    pub pipeline: Arc<Executor>,
    pub sandbox: Arc<Sandbox<CliProcessRunner>>,
    pub metrics: Metrics,
    pub suggest_cache: SuggestCache,
    /// `CRE_SECRET_<NAME>` mirrors (§4.12, §6), precomputed once at
    /// bootstrap so a direct (unstored) simulation can reuse the same
    /// environment the pipeline executor's steps get.
    pub secret_env: BTreeMap<String, String>,
}

impl App {
    pub fn bootstrap(config: &env::Config) -> Self {
        let storage = Arc::new(InMemoryStorage::new());
        let dyn_storage: Arc<dyn Storage> = storage.clone();
        let events = EventBus::new(Arc::new(StorageDurableLog::new(dyn_storage.clone())));
        let metrics = Metrics::new();

        let llm = Arc::new(CliLlmClient::new(LLM_COMMAND, Vec::new()));
        let type_checker = Arc::new(CliTypeChecker::new(TSC_COMMAND));
        let workflow_store = Arc::new(StorageWorkflowStore::new(dyn_storage.clone()));
        let generation = Arc::new(GenerationOrchestrator::new(
            llm,
            type_checker,
            workflow_store,
            SystemClock,
            UuidIdGen,
            GenerationConfig::default(),
        ));

        let sandbox_runner = CliProcessRunner::new(config.cre_cli_path.clone());
        let sandbox = Arc::new(Sandbox::new(sandbox_runner));
        let secrets = secret_env(&config.provider_keys_map());
        let runner = Arc::new(SandboxWorkflowRunner::new(sandbox.clone(), secrets.clone()));
        let pipeline_store = Arc::new(StoragePipelineStore::new(dyn_storage));
        let pipeline = Arc::new(
            PipelineExecutor::new(
                pipeline_store,
                runner,
                events.clone(),
                SystemClock,
                UuidIdGen,
                ExecutorConfig::default(),
            )
            .with_metrics(metrics.clone()),
        );

        Self {
            storage,
            events,
            generation,
            pipeline,
            sandbox,
            metrics,
            suggest_cache: SuggestCache::new(),
            secret_env: secrets,
        }
    }

    /// C19: reconcile crash-stale rows before the app starts taking
    /// requests. Never fails; every error is logged inside the sweep.
    pub async fn run_startup_sweep(&self) {
        let dyn_storage: Arc<dyn Storage> = self.storage.clone();
        forge_storage::run_startup_sweep(&dyn_storage, &SystemClock).await;
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
