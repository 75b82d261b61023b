//! CLI help and usage output.

use crate::prelude::cli;

#[test]
fn no_args_fails_with_usage() {
    cli().fails().stderr_has("Usage:");
}

#[test]
fn version_flag_prints_version() {
    cli().args(&["--version"]).passes().stdout_has("0.1");
}

#[test]
fn help_lists_subcommands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("generate")
        .stdout_has("simulate")
        .stdout_has("pipeline")
        .stdout_has("health");
}

#[test]
fn pipeline_help_lists_actions() {
    cli()
        .args(&["pipeline", "--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("check-compatibility");
}
