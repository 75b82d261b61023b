//! Test helpers for the `forge` CLI's behavioral specifications,
//! mirroring the donor workspace's `tests/specs/prelude.rs` shape: a
//! hand-rolled binary-path resolver plus a fluent command builder,
//! rather than pulling in an assertion-predicate crate.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary_path(name: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let standard = manifest_dir.join("target/debug").join(name);
    if standard.exists() {
        return standard;
    }
    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join(name);
            if fallback.exists() {
                return fallback;
            }
        }
    }
    standard
}

fn forge_binary() -> PathBuf {
    binary_path("forge")
}

/// Start building a `forge` invocation.
pub fn cli() -> CliBuilder {
    CliBuilder { args: Vec::new() }
}

pub struct CliBuilder {
    args: Vec<String>,
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn command(self) -> Command {
        let mut cmd = Command::new(forge_binary());
        cmd.args(&self.args);
        cmd
    }

    /// Run and expect exit code 0.
    pub fn passes(self) -> RunAssert {
        let output = self.command().output().expect("forge should run");
        assert!(
            output.status.success(),
            "expected forge to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
        RunAssert { output }
    }

    /// Run and expect a non-zero exit code.
    pub fn fails(self) -> RunAssert {
        let output = self.command().output().expect("forge should run");
        assert!(
            !output.status.success(),
            "expected forge to fail, but it passed\nstdout: {}",
            String::from_utf8_lossy(&output.stdout),
        );
        RunAssert { output }
    }
}

pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(expected), "stdout does not contain '{expected}'\nstdout: {stdout}");
        self
    }

    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(expected), "stderr does not contain '{expected}'\nstderr: {stderr}");
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout())
            .unwrap_or_else(|e| panic!("stdout was not valid JSON ({e}): {}", self.stdout()))
    }
}

/// A scratch directory for writing fixture JSON files (steps, configs,
/// schemas) that a CLI invocation reads by path.
pub struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir should create") }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("fixture write should succeed");
        path
    }
}

/// A minimal but non-empty restricted JSON-Schema fixture.
pub const PRICE_OUTPUT_SCHEMA: &str = r#"{
  "type": "object",
  "properties": { "price": {"type": "number"}, "symbol": {"type": "string"} },
  "required": ["price"]
}"#;

pub const PRICE_INPUT_SCHEMA: &str = r#"{
  "type": "object",
  "properties": { "value": {"type": "number"} },
  "required": ["value"]
}"#;

/// A single-step pipeline definition referencing a workflow id that
/// need not exist in storage (§4.15 resolves it at execution time, not
/// at parse time).
pub const ONE_STEP_PIPELINE: &str = r#"[
  {"id": "s1", "workflow_id": "w1", "position": 0, "input_mapping": {}}
]"#;
