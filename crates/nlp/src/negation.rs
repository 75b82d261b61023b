//! §4.5 step 3: negation window and the 40% poisoning threshold.

use crate::lexicon::NEGATION_MARKERS;

const POISON_WINDOW: usize = 5;

/// Scans `tokens` (already-lowercased content words) for negation
/// markers; each marker poisons the following `POISON_WINDOW` words.
/// The prompt is negated iff more than 40% of tokens fall under poison.
pub fn is_negated(tokens: &[String]) -> bool {
    if tokens.is_empty() {
        return false;
    }
    let mut poisoned = vec![false; tokens.len()];
    for (i, tok) in tokens.iter().enumerate() {
        if NEGATION_MARKERS.contains(&tok.as_str()) {
            let end = (i + POISON_WINDOW + 1).min(tokens.len());
            for p in poisoned.iter_mut().take(end).skip(i + 1) {
                *p = true;
            }
        }
    }
    let poisoned_count = poisoned.iter().filter(|p| **p).count();
    (poisoned_count as f64) / (tokens.len() as f64) > 0.4
}

#[cfg(test)]
#[path = "negation_tests.rs"]
mod tests;
