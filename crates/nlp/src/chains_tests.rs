use super::*;

fn kws(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn short_key_matches_by_word_boundary_only() {
    let chains = extract_chains("check eth price", &kws(&["check", "price"]));
    assert_eq!(chains, vec!["ethereum".to_string()]);
}

#[test]
fn short_key_does_not_match_inside_longer_word() {
    // "ethics" contains "eth" as a substring but not as a word.
    let chains = extract_chains("review the ethics of this", &kws(&["review", "ethics"]));
    assert_eq!(chains, vec!["ethereum".to_string()]);
}

#[test]
fn long_key_matches_by_substring() {
    let chains = extract_chains("deploy on polygon", &kws(&["deploy", "polygon"]));
    assert_eq!(chains, vec!["polygon".to_string()]);
}

#[test]
fn fuzzy_fallback_only_when_phase_one_empty() {
    let chains = extract_chains("deploy on polygn", &kws(&["deploy", "polygn"]));
    assert_eq!(chains, vec!["polygon".to_string()]);
}

#[test]
fn cross_chain_phrase_adds_baseline() {
    let chains = extract_chains("run this cross-chain", &kws(&["run"]));
    assert_eq!(chains, vec!["ethereum".to_string(), "polygon".to_string()]);
}

#[test]
fn defaults_when_nothing_resolves() {
    let chains = extract_chains("do something generic", &kws(&["something", "generic"]));
    assert_eq!(chains, vec!["ethereum".to_string()]);
}
