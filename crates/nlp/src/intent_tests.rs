use super::*;

#[test]
fn s1_happy_path_cron_price_alert() {
    let intent = parse("Every 5 minutes check ETH price and alert when it drops below $3000");
    assert_eq!(intent.trigger_type, forge_core::TriggerType::Cron);
    assert_eq!(intent.schedule.as_deref(), Some("*/5 * * * *"));
    assert!(intent.data_sources.contains(&"price-feed".to_string()));
    assert!(intent.chains.contains(&"ethereum".to_string()));
    assert!(intent.conditions.iter().any(|c| c.contains("3000")));
    assert!(!intent.negated);
}

#[test]
fn s8_ambiguous_prompt_elects_no_source() {
    let intent = parse("Pool resources for the media article project");
    assert!(!intent.data_sources.contains(&"defi-api".to_string()));
    assert!(!intent.data_sources.contains(&"news-api".to_string()));
}

#[test]
fn negation_dampens_confidence_and_sets_flag() {
    let intent = parse("Don't ever alert me about anything related to price drops, no never");
    assert!(intent.negated);
}

#[test]
fn invariants_hold_chains_and_actions_nonempty() {
    let intent = parse("xyzzy plugh");
    assert!(intent.is_valid());
    assert!(!intent.chains.is_empty());
    assert!(!intent.actions.is_empty());
}

#[test]
fn http_trigger_from_webhook_language() {
    let intent = parse("Set up a webhook endpoint that receives a POST request");
    assert_eq!(intent.trigger_type, forge_core::TriggerType::Http);
}
