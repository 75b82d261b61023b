//! `forge generate` (§6 POST /generate). No LLM binary is on `PATH` in
//! the test environment, so every attempt's transport call fails and
//! the orchestrator falls back (§4.11) rather than erroring — except
//! for the one case the orchestrator is allowed to surface a user
//! error for: no template matched at all (§4.11 "Template-not-found is
//! the only reason the orchestrator is allowed to surface a user error").

use crate::prelude::cli;

#[test]
fn happy_prompt_falls_back_to_a_valid_template_without_an_llm() {
    let run = cli()
        .args(&["generate", "Every 5 minutes check ETH price and alert when it drops below $3000"])
        .passes();
    let body = run.stdout_json();
    assert_eq!(body["fallback"], true);
    assert!(body["code"]["source"].as_str().unwrap_or_default().len() > 0);
    assert_eq!(body["intent"]["trigger_type"], "cron");
}

#[test]
fn ambiguous_prompt_reports_template_not_found() {
    cli()
        .args(&["generate", "What is the meaning of life and the universe"])
        .fails()
        .stderr_has("TemplateNotFound");
}
