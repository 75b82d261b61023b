//! C16 — pipeline pricing: sum of per-workflow prices plus a per-step
//! breakdown.

use forge_core::{StepId, Usdc6, WorkflowId};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriceLine {
    pub step_id: StepId,
    pub workflow_id: WorkflowId,
    pub price: Usdc6,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelinePrice {
    pub total: Usdc6,
    pub breakdown: Vec<PriceLine>,
}

/// Sum a pipeline's per-step workflow prices. `lines` is expected in
/// step order; the breakdown preserves that order.
pub fn price_pipeline(lines: Vec<PriceLine>) -> PipelinePrice {
    let total = lines.iter().map(|l| l.price).sum();
    PipelinePrice { total, breakdown: lines }
}

#[cfg(test)]
#[path = "pricing_tests.rs"]
mod tests;
