//! `forge simulate` (§6 POST /simulate). No `cre` binary is on `PATH`
//! in the test environment, so the sandbox (C11) cannot even start a
//! subprocess — that surfaces as a `CreCliError`, distinct from a
//! simulation that runs but fails (§4.10: binary-missing is the one
//! case `Sandbox::simulate` returns `Err` instead of a failed result).

use crate::prelude::{cli, Fixture};

#[test]
fn stored_simulate_of_an_unknown_workflow_reports_not_found() {
    cli()
        .args(&["simulate", "stored", "does-not-exist"])
        .fails()
        .stderr_has("WorkflowNotFound");
}

#[test]
fn direct_simulate_without_a_cre_binary_reports_cre_cli_error() {
    let fixture = Fixture::new();
    let code_path = fixture.write("workflow.ts", "export function handler() { return 1; }");
    let config_path = fixture.write("config.json", "{}");

    cli()
        .args(&[
            "simulate",
            "direct",
            "--code",
            code_path.to_str().unwrap(),
            "--config",
            config_path.to_str().unwrap(),
        ])
        .fails()
        .stderr_has("CreCliError");
}
