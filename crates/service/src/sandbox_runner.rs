//! Production `ProcessRunner` (C13's collaborator trait): shells out
//! to `npm` for dependency materialization and to the configured `cre`
//! binary for the simulator itself, the same `Command` + captured
//! `Output` shape the teacher's subprocess helpers use.

use async_trait::async_trait;
use forge_sandbox::ProcessRunner;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

const RUNTIME_DEPENDENCIES: &[&str] = &["@chainlink/cre-sdk", "zod"];

/// Shells out to `npm` and to `CRE_CLI_PATH` (§6 env var). Sandbox-side
/// timeouts (dep install, simulate) are already enforced by
/// `forge_sandbox::Sandbox`, so this collaborator doesn't duplicate
/// them.
pub struct CliProcessRunner {
    cre_cli_path: PathBuf,
}

impl CliProcessRunner {
    pub fn new(cre_cli_path: impl Into<PathBuf>) -> Self {
        Self {
            cre_cli_path: cre_cli_path.into(),
        }
    }
}

#[async_trait]
impl ProcessRunner for CliProcessRunner {
    async fn link_or_install_deps(&self, project_dir: &Path) -> Result<bool, String> {
        let linked = Command::new("npm")
            .arg("link")
            .args(RUNTIME_DEPENDENCIES)
            .current_dir(project_dir)
            .output()
            .await;
        if let Ok(output) = &linked {
            if output.status.success() {
                return Ok(true);
            }
        }

        let installed = Command::new("npm")
            .arg("install")
            .current_dir(project_dir)
            .output()
            .await
            .map_err(|e| format!("failed to launch npm install: {e}"))?;
        if installed.status.success() {
            Ok(false)
        } else {
            Err(String::from_utf8_lossy(&installed.stderr).into_owned())
        }
    }

    async fn run_simulator(
        &self,
        project_dir: &Path,
        env: &BTreeMap<String, String>,
    ) -> std::io::Result<Output> {
        Command::new(&self.cre_cli_path)
            .arg("simulate")
            .current_dir(project_dir)
            .envs(env)
            .output()
            .await
    }
}

#[cfg(test)]
#[path = "sandbox_runner_tests.rs"]
mod tests;
