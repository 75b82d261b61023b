//! `forge pipeline` (§6 /pipelines family). Each test is a single
//! `forge` invocation: storage is in-memory and process-scoped, so a
//! pipeline seeded by one `create` call isn't visible to a later
//! process's `show`/`execute` (§9 single-process assumption) — that's
//! exercised here as "unknown id" behavior instead.

use crate::prelude::{cli, Fixture, ONE_STEP_PIPELINE, PRICE_INPUT_SCHEMA, PRICE_OUTPUT_SCHEMA};

#[test]
fn create_seeds_a_pipeline_and_echoes_its_steps() {
    let fixture = Fixture::new();
    let steps_path = fixture.write("steps.json", ONE_STEP_PIPELINE);

    let run = cli()
        .args(&["pipeline", "create", "--steps", steps_path.to_str().unwrap()])
        .passes();
    let body = run.stdout_json();
    assert_eq!(body["active"], true);
    assert_eq!(body["steps"].as_array().unwrap().len(), 1);
    assert_eq!(body["steps"][0]["id"], "s1");
}

#[test]
fn show_unknown_pipeline_reports_not_found() {
    cli()
        .args(&["pipeline", "show", "does-not-exist"])
        .fails()
        .stderr_has("PipelineNotFound");
}

#[test]
fn execute_unknown_pipeline_reports_not_found() {
    cli()
        .args(&["pipeline", "execute", "does-not-exist"])
        .fails()
        .stderr_has("PipelineNotFound");
}

#[test]
fn check_compatibility_matches_the_price_field_exactly() {
    let fixture = Fixture::new();
    let output_schema = fixture.write("output.json", PRICE_OUTPUT_SCHEMA);
    let input_schema = fixture.write("input.json", PRICE_INPUT_SCHEMA);

    let run = cli()
        .args(&[
            "pipeline",
            "check-compatibility",
            "--output-schema",
            output_schema.to_str().unwrap(),
            "--input-schema",
            input_schema.to_str().unwrap(),
        ])
        .passes();
    let body = run.stdout_json();
    assert_eq!(body["compatible"], true);
    assert_eq!(body["matchedFields"][0]["sourceField"], "price");
}
