//! `GenerateResult` — what the generation orchestrator (C12) hands
//! back to the `/generate` endpoint contract (§6), win or fallback.

use crate::generated::GeneratedCode;
use crate::intent::ParsedIntent;
use crate::template::TemplateMatch;
use crate::validation::ValidationResult;
use crate::workflow::WorkflowId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResult {
    pub workflow_id: WorkflowId,
    pub code: GeneratedCode,
    pub validation: ValidationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateMatch>,
    pub intent: ParsedIntent,
    /// True iff the pre-built fallback template was used verbatim
    /// instead of LLM-generated code (§4.11).
    pub fallback: bool,
}

impl GenerateResult {
    /// §8 property 5: `fallback == false` implies `validation.valid()`.
    pub fn upholds_fallback_invariant(&self) -> bool {
        self.fallback || self.validation.valid()
    }
}

#[cfg(test)]
#[path = "generate_result_tests.rs"]
mod tests;
