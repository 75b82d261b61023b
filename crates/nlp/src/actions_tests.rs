use super::*;

fn kws(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn confirming_token_elects_swap() {
    let actions = extract_actions("swap via uniswap router", &kws(&["swap", "uniswap", "router"]));
    assert!(actions.contains(&"swap".to_string()));
}

#[test]
fn generic_commerce_words_do_not_elect_swap() {
    let actions = extract_actions("buy and sell some tokens", &kws(&["tokens"]));
    assert!(!actions.contains(&"swap".to_string()));
}

#[test]
fn empty_input_defaults_to_onchain_write() {
    let actions = extract_actions("do nothing in particular", &kws(&["nothing", "particular"]));
    assert_eq!(actions, vec![DEFAULT_ACTION.to_string()]);
}

#[test]
fn multiple_actions_can_coexist() {
    let actions = extract_actions("mint then stake the reward", &kws(&["mint", "stake", "reward"]));
    assert!(actions.contains(&"mint".to_string()));
    assert!(actions.contains(&"stake".to_string()));
}
