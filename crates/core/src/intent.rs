//! `ParsedIntent` — the output of the NLP intent parser (C6), consumed
//! by the template matcher (C7) and prompt assembly (C8).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Cron,
    Http,
    EvmLog,
    Unknown,
}

impl Default for TriggerType {
    fn default() -> Self {
        TriggerType::Unknown
    }
}

/// A fully-parsed, immutable representation of a natural-language prompt.
///
/// Invariants upheld by the constructors in `forge-nlp` (never hand-built
/// elsewhere, so they hold for the type's whole lifetime):
/// - `chains` is never empty (defaulted when unresolved)
/// - `actions` is never empty (defaulted to the onchain-write tag)
/// - if `negated`, `confidence <= 0.4 * raw_confidence`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub trigger_type: TriggerType,
    pub confidence: f64,
    pub schedule: Option<String>,
    pub data_sources: Vec<String>,
    pub actions: Vec<String>,
    pub chains: Vec<String>,
    pub conditions: Vec<String>,
    pub keywords: Vec<String>,
    pub negated: bool,
    pub entities: BTreeMap<String, BTreeSet<String>>,
}

/// Default action tag used when nothing else is detected (§3 invariant).
pub const DEFAULT_ACTION: &str = "onchain-write";
/// Default chain used when nothing resolves (§4.5 phase 3 fallback).
pub const DEFAULT_CHAIN: &str = "ethereum";

impl ParsedIntent {
    /// Construct directly (used by tests and by the fallback path);
    /// enforces the non-empty invariants on `chains`/`actions`.
    pub fn new(trigger_type: TriggerType, confidence: f64) -> Self {
        Self {
            trigger_type,
            confidence: confidence.clamp(0.0, 1.0),
            schedule: None,
            data_sources: Vec::new(),
            actions: vec![DEFAULT_ACTION.to_string()],
            chains: vec![DEFAULT_CHAIN.to_string()],
            conditions: Vec::new(),
            keywords: Vec::new(),
            negated: false,
            entities: BTreeMap::new(),
        }
    }

    /// Structural invariant check (non-empty `chains`/`actions`). The
    /// negation confidence-dampening invariant is enforced at
    /// construction time in `forge-nlp` rather than here, since it
    /// depends on the pre-negation confidence which this type doesn't
    /// retain.
    pub fn is_valid(&self) -> bool {
        !self.chains.is_empty() && !self.actions.is_empty()
    }
}

#[cfg(test)]
#[path = "intent_tests.rs"]
mod tests;
