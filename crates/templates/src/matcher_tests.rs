use super::*;
use forge_core::TriggerType;

#[test]
fn s1_price_alert_prompt_matches_template_one() {
    let intent = forge_nlp::parse("Every 5 minutes check ETH price and alert when it drops below $3000");
    let m = match_template(&intent, None).expect("template should match");
    assert_eq!(m.template_id, 1);
    assert!(m.confidence >= 0.30);
}

#[test]
fn s2_ambiguous_prompt_matches_no_template() {
    let intent = forge_nlp::parse("What is the meaning of life and the universe");
    assert!(match_template(&intent, None).is_none());
}

#[test]
fn force_template_id_bypasses_scoring() {
    let intent = forge_nlp::parse("What is the meaning of life and the universe");
    let m = match_template(&intent, Some(3)).expect("forced id exists");
    assert_eq!(m.template_id, 3);
    assert_eq!(m.confidence, 1.0);
}

#[test]
fn force_template_id_unknown_returns_none() {
    let intent = forge_nlp::parse("anything");
    assert!(match_template(&intent, Some(99_999)).is_none());
}

#[test]
fn trigger_mismatch_with_known_trigger_is_penalized() {
    let mut intent = forge_nlp::parse("webhook endpoint request relay forward");
    intent.trigger_type = TriggerType::EvmLog;
    let (score, _) = super::score_template(catalog::by_id(3).unwrap(), &intent);
    let mut matching = intent.clone();
    matching.trigger_type = TriggerType::Http;
    let (score_matching, _) = super::score_template(catalog::by_id(3).unwrap(), &matching);
    assert!(score_matching > score);
}
