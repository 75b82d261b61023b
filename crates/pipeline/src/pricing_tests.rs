use super::*;

#[test]
fn total_is_the_sum_of_the_breakdown() {
    let lines = vec![
        PriceLine { step_id: StepId::new("s1"), workflow_id: WorkflowId::new("w1"), price: Usdc6::from_micros(1_000_000) },
        PriceLine { step_id: StepId::new("s2"), workflow_id: WorkflowId::new("w2"), price: Usdc6::from_micros(2_500_000) },
    ];
    let price = price_pipeline(lines);
    assert_eq!(price.total, Usdc6::from_micros(3_500_000));
    assert_eq!(price.breakdown.len(), 2);
}

#[test]
fn empty_pipeline_prices_to_zero() {
    let price = price_pipeline(vec![]);
    assert_eq!(price.total, Usdc6::ZERO);
    assert!(price.breakdown.is_empty());
}
