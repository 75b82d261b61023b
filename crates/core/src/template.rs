//! `TemplateDefinition`/`TemplateMatch` — the static catalog entry and
//! the matcher's (C7) scored result, from `forge-templates`.

use crate::intent::TriggerType;
use serde::{Deserialize, Serialize};

/// A fixed, compile-time catalog entry. The full catalog lives in
/// `forge-templates`; this type just describes its shape so other
/// crates (prompt assembly, the orchestrator) can depend on it without
/// depending on the catalog's scoring logic.
///
/// `required_capabilities` is a free-form tag list, not the narrower
/// `simulation::Capability` enum: the matcher (§4.6) scores its
/// overlap directly against `ParsedIntent::data_sources` and
/// `ParsedIntent::actions` (e.g. `"price-feed"`, `"onchain-write"`),
/// so the vocabulary has to match theirs rather than the trace-step
/// capability tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub required_capabilities: Vec<String>,
    pub expected_trigger: TriggerType,
    pub prompt_seed: String,
}

/// The matcher's (C7) scored result for one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatch {
    pub template_id: u32,
    pub name: String,
    pub category: String,
    pub confidence: f64,
    pub matched_keywords: Vec<String>,
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
