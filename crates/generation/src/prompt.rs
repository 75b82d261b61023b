//! C8 — prompt assembly. Static sections (role, hard constraints, API
//! reference, output instructions) plus dynamic sections (few-shot
//! siblings, capability docs, state-management guidance, retry
//! context), all served from module-level statics populated once.

use forge_core::{ParsedIntent, TemplateMatch};
use forge_nlp::lexicon::{stem_matches, STATE_KEYWORDS};
use std::collections::HashMap;
use std::sync::LazyLock;

/// The seven hard constraints every generated workflow must satisfy;
/// mirrors the static validator's (C11) categories 1:1 so the model
/// never has to guess what "valid" means.
pub const HARD_CONSTRAINTS: &[&str] = &[
    "Only import from @chainlink/cre-sdk (and its subpaths), zod, or viem (and its subpaths), plus relative/absolute local paths.",
    "The handler callback passed to handler(trigger, cb) must not be declared async and must not use await anywhere in its body.",
    "Export a top-level function named `main`.",
    "Declare a top-level `configSchema` bound to a `z.object(...)` call.",
    "Never call `.then(async ...)`.",
    "config_json must parse to a non-null, non-array object.",
    "If the workflow writes onchain, uses a cron schedule, or calls HTTP, config must carry the matching key (chain id, schedule, or URL).",
];

const API_REFERENCE: &str = r#"Runtime API surface:
  handler(trigger, (payload) => { ... })       // synchronous callback only
  const configSchema = z.object({ ... })
  HTTPClient.get(url) / HTTPClient.post(url, body)
  EVMClient.readContract(...) / EVMClient.writeContract(...)
  Runner.run(...)                               // consensus aggregation marker
"#;

const OUTPUT_INSTRUCTIONS: &str = "Respond with the structured-output schema fields: reasoning, code, config (as a JSON string), consumerContract (optional), selfReview, explanation. Do not wrap code in markdown fences.";

/// Two sibling templates per template id, used for few-shot context
/// (§4.7). Symmetric by construction (built once below).
static TEMPLATE_RELATIONS: LazyLock<HashMap<u32, [u32; 2]>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert(1, [10, 6]);
    map.insert(2, [9, 11]);
    map.insert(3, [6, 8]);
    map.insert(4, [12, 5]);
    map.insert(5, [4, 12]);
    map.insert(6, [1, 3]);
    map.insert(7, [6, 1]);
    map.insert(8, [3, 9]);
    map.insert(9, [2, 8]);
    map.insert(10, [1, 9]);
    map.insert(11, [2, 9]);
    map.insert(12, [4, 5]);
    map
});

/// Capability -> doc snippet, keyed by the same free-form tags used in
/// `TemplateDefinition::required_capabilities`.
static CAPABILITY_DOCS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("trigger", "Trigger: either a cron schedule, an HTTP endpoint, or an EVM log filter, configured in configSchema.");
    map.insert("httpClient", "HTTPClient: use for polling external REST APIs; always check response.ok before parsing.");
    map.insert("evmClient", "EVMClient: readContract for views, writeContract for state-changing calls; both take a chain id from config.");
    map.insert("consensus", "Consensus: when multiple node executions run the same workflow, Runner reconciles outputs by median/identical/by-field.");
    map.insert("price-feed", "Price feeds are read via HTTPClient against a quote endpoint configured in config.priceFeedUrl.");
    map.insert("defi-api", "DeFi protocol calls go through EVMClient.writeContract against a router address in config.");
    map.insert("news-api", "News sources are polled via HTTPClient against a configured feed URL.");
    map
});

#[derive(Debug, Clone, Default)]
pub struct RetryContext {
    pub previous_error: String,
    pub previous_self_review: String,
}

#[derive(Debug, Clone)]
pub struct PromptSections {
    pub system: String,
    pub user: String,
}

fn system_prompt() -> String {
    let mut s = String::new();
    s.push_str("You are the code-generation stage of an onchain workflow forge.\n\n");
    s.push_str("Hard constraints:\n");
    for (i, c) in HARD_CONSTRAINTS.iter().enumerate() {
        s.push_str(&format!("{}. {}\n", i + 1, c));
    }
    s.push('\n');
    s.push_str(API_REFERENCE);
    s.push('\n');
    s.push_str(OUTPUT_INSTRUCTIONS);
    s
}

fn few_shot_section(template: Option<&TemplateMatch>) -> String {
    let Some(template) = template else {
        return String::new();
    };
    let Some(siblings) = TEMPLATE_RELATIONS.get(&template.template_id) else {
        return String::new();
    };
    let mut s = String::from("Related examples (for style, not for copying verbatim):\n");
    for sibling_id in siblings {
        if let Some(t) = forge_templates::by_id(*sibling_id) {
            s.push_str(&format!("- {} ({})\n", t.name, t.prompt_seed));
        }
    }
    s
}

fn capability_docs_section(template: Option<&TemplateMatch>) -> String {
    let Some(template) = template else {
        return String::new();
    };
    let Some(def) = forge_templates::by_id(template.template_id) else {
        return String::new();
    };
    let mut s = String::from("Capability reference:\n");
    for cap in &def.required_capabilities {
        if let Some(doc) = CAPABILITY_DOCS.get(cap.as_str()) {
            s.push_str(&format!("- {doc}\n"));
        }
    }
    s
}

/// §4.7: included when the intent's keywords (exact or stemmed) match
/// the fixed state-keyword set.
fn state_management_section(intent: &ParsedIntent) -> String {
    let needs_state = intent
        .keywords
        .iter()
        .any(|kw| STATE_KEYWORDS.iter().any(|sk| stem_matches(kw, sk)));
    if needs_state {
        "This workflow needs to persist state across runs: store it in config under a dedicated key and read it back at the start of the handler; never rely on closures surviving between invocations.\n".to_string()
    } else {
        String::new()
    }
}

fn intent_summary(intent: &ParsedIntent) -> String {
    format!(
        "Parsed intent: trigger={:?}, confidence={:.2}, schedule={}, data_sources={:?}, actions={:?}, chains={:?}, conditions={:?}",
        intent.trigger_type,
        intent.confidence,
        intent.schedule.as_deref().unwrap_or("none"),
        intent.data_sources,
        intent.actions,
        intent.chains,
        intent.conditions,
    )
}

fn template_summary(template: Option<&TemplateMatch>) -> String {
    match template {
        Some(t) => format!(
            "Matched template: {} (id={}, confidence={:.2})",
            t.name, t.template_id, t.confidence
        ),
        None => "No template matched; generate from the intent directly.".to_string(),
    }
}

/// Build the full system+user prompt pair (§4.7). `retry` is `Some`
/// only on orchestrator retries, and carries the previous attempt's
/// validator errors and self-review verbatim.
pub fn assemble(
    prompt: &str,
    intent: &ParsedIntent,
    template: Option<&TemplateMatch>,
    retry: Option<&RetryContext>,
) -> PromptSections {
    let mut user = String::new();
    user.push_str("User request:\n");
    user.push_str(prompt);
    user.push_str("\n\n");
    user.push_str(&intent_summary(intent));
    user.push('\n');
    user.push_str(&template_summary(template));
    user.push('\n');

    let few_shot = few_shot_section(template);
    if !few_shot.is_empty() {
        user.push('\n');
        user.push_str(&few_shot);
    }
    let docs = capability_docs_section(template);
    if !docs.is_empty() {
        user.push('\n');
        user.push_str(&docs);
    }
    let state = state_management_section(intent);
    if !state.is_empty() {
        user.push('\n');
        user.push_str(&state);
    }

    if let Some(retry) = retry {
        user.push_str("\nRetry Context:\n");
        user.push_str("Previous error:\n");
        user.push_str(&retry.previous_error);
        user.push_str("\nPrevious self-review:\n");
        user.push_str(&retry.previous_self_review);
        user.push('\n');
    }

    PromptSections {
        system: system_prompt(),
        user,
    }
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;
