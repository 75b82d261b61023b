//! C13 — the simulation sandbox. A bounded-concurrency subprocess
//! runner that walks ADMISSION -> MATERIALIZE -> DEP_READY -> SIMULATE
//! -> PARSE -> RETURN (§4.12), with scoped temp-dir + semaphore
//! release on every exit path (§9).

use crate::trace::parse_trace;
use async_trait::async_trait;
use forge_concurrency::semaphore::Semaphore;
use forge_core::{ErrorCode, ForgeError, SimulationResult};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tracing::warn;

const MAX_CONCURRENT_SIMS: usize = 3;
const DEP_INSTALL_TIMEOUT: Duration = Duration::from_secs(30);
const SIMULATE_TIMEOUT: Duration = Duration::from_secs(60);
/// Hard cap on captured stdout/stderr, applied independently to each
/// stream, before anything is handed to the trace parser (§4.12, §9).
const OUTPUT_CAP_BYTES: usize = 2 * 1024 * 1024;
const INSTALL_STDERR_HEAD: usize = 500;

const RUNTIME_DEPENDENCIES: &[&str] = &["@chainlink/cre-sdk", "zod"];

/// A runnable child process. The sandbox depends on this trait instead
/// of `tokio::process::Command` directly so the "binary missing" path
/// and forced timeouts are testable without a real CLI on `PATH`.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Link or install the two runtime dependencies into `project_dir`.
    /// Returns `Ok(true)` if the fast link path succeeded, `Ok(false)`
    /// if it fell through to an install that also succeeded, and `Err`
    /// on install failure.
    async fn link_or_install_deps(&self, project_dir: &Path) -> Result<bool, String>;

    /// Spawn the external simulator CLI against the materialized
    /// project directory. `Err(NotFound)` is reserved for "the binary
    /// itself could not be launched" (§4.12 binary-missing path); any
    /// other outcome, including a non-zero exit, is `Ok`.
    async fn run_simulator(
        &self,
        project_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> std::io::Result<Output>;
}

fn truncate_bytes(mut s: Vec<u8>, cap: usize) -> String {
    if s.len() > cap {
        s.truncate(cap);
        let mut text = String::from_utf8_lossy(&s).into_owned();
        text.push_str("\n...[truncated]");
        text
    } else {
        String::from_utf8_lossy(&s).into_owned()
    }
}

/// Secret-bearing environment variables mirrored into the subprocess,
/// `CRE_SECRET_<NAME>` per provider key (§4.12, §6).
pub fn secret_env(provider_keys: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    provider_keys
        .iter()
        .map(|(name, value)| (format!("CRE_SECRET_{}", name.to_uppercase()), value.clone()))
        .collect()
}

/// Write `source`, `config.json`, and a minimal manifest naming the
/// two runtime dependencies into a fresh temp directory (§4.12
/// MATERIALIZE). The directory is removed by the caller on every exit
/// path, never here.
async fn materialize(
    dir: &Path,
    source: &str,
    config: &serde_json::Value,
) -> Result<(), std::io::Error> {
    tokio::fs::write(dir.join("workflow.ts"), source).await?;
    tokio::fs::write(
        dir.join("config.json"),
        serde_json::to_vec_pretty(config).unwrap_or_default(),
    )
    .await?;
    let manifest = serde_json::json!({
        "name": "cre-simulation",
        "private": true,
        "dependencies": RUNTIME_DEPENDENCIES.iter().map(|d| (d.to_string(), "*")).collect::<BTreeMap<_, _>>(),
    });
    tokio::fs::write(
        dir.join("package.json"),
        serde_json::to_vec_pretty(&manifest).unwrap_or_default(),
    )
    .await?;
    Ok(())
}

pub struct Sandbox<R: ProcessRunner> {
    runner: R,
    semaphore: Semaphore,
}

impl<R: ProcessRunner> Sandbox<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            semaphore: Semaphore::new(MAX_CONCURRENT_SIMS),
        }
    }

    /// Run one simulation end to end. All failures through
    /// MATERIALIZE/DEP_READY/SIMULATE/PARSE return a
    /// `SimulationResult { success: false, .. }` rather than an error
    /// (§4.12): the one exception is the simulator binary itself being
    /// missing, which is surfaced as `CRE_CLI_ERROR`.
    pub async fn simulate(
        &self,
        source: &str,
        config: &serde_json::Value,
        secret_env: BTreeMap<String, String>,
    ) -> Result<SimulationResult, ForgeError> {
        let _permit = self.semaphore.acquire().await;

        let temp_dir = match tempfile::tempdir() {
            Ok(d) => d,
            Err(e) => {
                return Ok(failed_result(format!("failed to create sandbox directory: {e}")));
            }
        };
        let project_dir = temp_dir.path();

        if let Err(e) = materialize(project_dir, source, config).await {
            return Ok(failed_result(format!("failed to materialize project: {e}")));
        }

        let dep_ready = tokio::time::timeout(
            DEP_INSTALL_TIMEOUT,
            self.runner.link_or_install_deps(project_dir),
        )
        .await;
        match dep_ready {
            Err(_elapsed) => {
                return Ok(failed_result(format!(
                    "dependency install timed out after {}s",
                    DEP_INSTALL_TIMEOUT.as_secs()
                )));
            }
            Ok(Ok(_linked)) => {}
            Ok(Err(stderr)) => {
                let mut head = stderr;
                head.truncate(INSTALL_STDERR_HEAD);
                return Ok(failed_result(format!("dependency install failed: {head}")));
            }
        }

        let run = tokio::time::timeout(
            SIMULATE_TIMEOUT,
            self.runner.run_simulator(project_dir, &secret_env),
        )
        .await;

        let output = match run {
            Err(_elapsed) => {
                return Ok(failed_result(format!(
                    "simulator timed out after {}s",
                    SIMULATE_TIMEOUT.as_secs()
                )));
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                // temp_dir's Drop removes the directory; surfaced here,
                // not returned as a result (§4.12).
                return Err(ForgeError::new(
                    ErrorCode::CreCliError,
                    format!("simulator binary not found: {e}"),
                ));
            }
            Ok(Err(e)) => {
                return Ok(failed_result(format!("simulator failed to launch: {e}")));
            }
            Ok(Ok(output)) => output,
        };

        let exit_success = output.status.success();
        let stdout = truncate_bytes(output.stdout, OUTPUT_CAP_BYTES);
        let stderr = truncate_bytes(output.stderr, OUTPUT_CAP_BYTES);
        let combined = format!("{stdout}\n{stderr}");

        let mut parsed = parse_trace(&combined);
        if !exit_success {
            parsed
                .errors
                .push(format!("simulator exited with non-zero status: {:?}", output.status.code()));
        }

        let total_duration_ms: u64 = parsed.steps.iter().filter_map(|s| s.duration_ms).sum();

        Ok(SimulationResult::from_parts(
            exit_success,
            parsed.steps,
            parsed.errors,
            parsed.warnings,
            total_duration_ms,
            combined,
        ))
    }
}

fn failed_result(reason: String) -> SimulationResult {
    warn!(reason = %reason, "simulation failed before producing a trace");
    SimulationResult {
        success: false,
        steps: Vec::new(),
        total_duration_ms: 0,
        errors: vec![reason],
        warnings: Vec::new(),
        raw_output: String::new(),
    }
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
