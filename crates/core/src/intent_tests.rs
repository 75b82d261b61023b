use super::*;

#[test]
fn new_defaults_chain_and_action() {
    let intent = ParsedIntent::new(TriggerType::Cron, 0.9);
    assert_eq!(intent.chains, vec![DEFAULT_CHAIN]);
    assert_eq!(intent.actions, vec![DEFAULT_ACTION]);
    assert!(intent.is_valid());
}

#[test]
fn confidence_is_clamped() {
    let intent = ParsedIntent::new(TriggerType::Http, 5.0);
    assert_eq!(intent.confidence, 1.0);
    let intent = ParsedIntent::new(TriggerType::Http, -5.0);
    assert_eq!(intent.confidence, 0.0);
}

#[test]
fn trigger_type_defaults_to_unknown() {
    assert_eq!(TriggerType::default(), TriggerType::Unknown);
}
