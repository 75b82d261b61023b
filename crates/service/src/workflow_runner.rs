//! Bridges the simulation sandbox (C13) into the pipeline executor's
//! `WorkflowRunner` collaborator (§5: "Pipeline executor does *not*
//! take the simulation semaphore itself; each step's call into the
//! sandbox does" — that's exactly what wrapping `Sandbox` here gives
//! us, since `Sandbox::simulate` owns its own semaphore acquire).

use async_trait::async_trait;
use forge_core::{ForgeError, SimulationResult, Workflow};
use forge_pipeline::WorkflowRunner;
use forge_sandbox::{ProcessRunner, Sandbox};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub struct SandboxWorkflowRunner<R: ProcessRunner> {
    sandbox: Arc<Sandbox<R>>,
    secret_env: BTreeMap<String, String>,
}

impl<R: ProcessRunner> SandboxWorkflowRunner<R> {
    pub fn new(sandbox: Arc<Sandbox<R>>, secret_env: BTreeMap<String, String>) -> Self {
        Self { sandbox, secret_env }
    }
}

#[async_trait]
impl<R: ProcessRunner> WorkflowRunner for SandboxWorkflowRunner<R> {
    async fn run(&self, workflow: &Workflow, input: &Value) -> Result<SimulationResult, ForgeError> {
        let config = merge_config(&workflow.config, input);
        self.sandbox
            .simulate(&workflow.code, &config, self.secret_env.clone())
            .await
    }
}

fn merge_config(defaults: &BTreeMap<String, Value>, input: &Value) -> Value {
    let Value::Object(obj) = input else {
        return input.clone();
    };
    let mut merged: serde_json::Map<String, Value> = defaults.clone().into_iter().collect();
    for (k, v) in obj {
        merged.insert(k.clone(), v.clone());
    }
    Value::Object(merged)
}

#[cfg(test)]
#[path = "workflow_runner_tests.rs"]
mod tests;
