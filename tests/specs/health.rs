//! `forge health` (§6 GET /health).

use crate::prelude::cli;

#[test]
fn health_reports_ok_against_fresh_in_memory_storage() {
    let run = cli().args(&["health"]).passes();
    let body = run.stdout_json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], true);
    assert_eq!(body["sseClients"], 0);
}
