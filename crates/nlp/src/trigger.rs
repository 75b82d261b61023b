//! §4.5 step 4: trigger classification via three weighted signal sets.

use crate::lexicon::{fuzzy_matches, stem_matches};
use forge_core::TriggerType;

const CRON_BONUS: f64 = 3.0;

struct Signal {
    trigger: TriggerType,
    words: &'static [&'static str],
}

const SIGNALS: &[Signal] = &[
    Signal {
        trigger: TriggerType::Cron,
        words: &[
            "every", "schedule", "scheduled", "hourly", "daily", "weekly", "cron", "periodic",
            "interval", "minute", "minutes", "hour", "hours", "recurring",
        ],
    },
    Signal {
        trigger: TriggerType::Http,
        words: &[
            "webhook", "http", "api", "endpoint", "request", "callback", "post", "get", "fetch",
            "poll",
        ],
    },
    Signal {
        trigger: TriggerType::EvmLog,
        words: &[
            "event", "log", "emit", "onchain", "contract", "transaction", "block", "transfer",
            "mint", "burn",
        ],
    },
];

/// Match score for one signal set against `keywords`: substring
/// include > stemmed match > adaptive fuzzy match > no match, summed
/// across every signal word that matches any keyword (§4.5.4 tiers).
fn signal_score(words: &[&str], keywords: &[String]) -> f64 {
    let mut score = 0.0;
    for signal_word in words {
        let matched = keywords.iter().any(|kw| kw.contains(signal_word))
            || keywords.iter().any(|kw| stem_matches(kw, signal_word))
            || keywords.iter().any(|kw| fuzzy_matches(kw, signal_word));
        if matched {
            score += 1.0;
        }
    }
    score
}

/// Classify the trigger type and its confidence. Ties resolve
/// cron > http > evm_log (signal declaration order).
pub fn classify(keywords: &[String], has_schedule: bool) -> (TriggerType, f64) {
    let mut scores: Vec<(TriggerType, f64)> = SIGNALS
        .iter()
        .map(|s| {
            let mut score = signal_score(s.words, keywords);
            if s.trigger == TriggerType::Cron && has_schedule {
                score += CRON_BONUS;
            }
            (s.trigger, score)
        })
        .collect();

    let total: f64 = scores.iter().map(|(_, s)| s).sum();
    if total <= 0.0 {
        return (TriggerType::Unknown, 0.0);
    }

    scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    let (best_trigger, best_score) = scores[0];
    (best_trigger, best_score / total)
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
