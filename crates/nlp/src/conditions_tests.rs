use super::*;

#[test]
fn extracts_drops_below() {
    let conds = extract_conditions("alert when it drops below $3000");
    assert_eq!(conds, vec!["drops below 3000"]);
}

#[test]
fn extracts_multiple_distinct_conditions() {
    let conds = extract_conditions("alert when price rises above $100 or crosses $50");
    assert_eq!(conds, vec!["rises above 100", "crosses 50"]);
}

#[test]
fn dedupes_repeated_condition() {
    let conds = extract_conditions("drops below $10 and drops below $10 again");
    assert_eq!(conds, vec!["drops below 10"]);
}

#[test]
fn no_condition_phrase_returns_empty() {
    assert!(extract_conditions("check the price every hour").is_empty());
}
