//! Output of the code-generator adapter (C9).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCode {
    pub source: String,
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_contract: Option<String>,
    pub explanation: String,
    pub self_review: String,
}

impl GeneratedCode {
    /// §4.8 step 2: a response is rejected if the source is missing or
    /// whitespace-only.
    pub fn has_source(&self) -> bool {
        !self.source.trim().is_empty()
    }
}
