//! §4.5 step 6: condition extraction via fixed regex templates.

use regex::Regex;
use std::sync::LazyLock;

struct ConditionPattern {
    regex: LazyLock<Regex>,
    render: fn(&regex::Captures) -> String,
}

macro_rules! condition_pattern {
    ($re:literal, $render:expr) => {
        ConditionPattern {
            regex: LazyLock::new(|| {
                Regex::new($re).unwrap_or_else(|e| unreachable!("constant regex pattern is valid: {e}"))
            }),
            render: $render,
        }
    };
}

static PATTERNS: &[ConditionPattern] = &[
    condition_pattern!(r"(?i)drops?\s+below\s+\$?(\d+(?:\.\d+)?)", |c| format!(
        "drops below {}",
        &c[1]
    )),
    condition_pattern!(r"(?i)rises?\s+above\s+\$?(\d+(?:\.\d+)?)", |c| format!(
        "rises above {}",
        &c[1]
    )),
    condition_pattern!(r"(?i)crosses\s+\$?(\d+(?:\.\d+)?)", |c| format!(
        "crosses {}",
        &c[1]
    )),
    condition_pattern!(r"(?i)deviation\s+of\s+(\d+(?:\.\d+)?)\s*%", |c| format!(
        "deviation-of {}%",
        &c[1]
    )),
    condition_pattern!(r"(?i)below\s+\$(\d+(?:\.\d+)?)", |c| format!("below ${}", &c[1])),
    condition_pattern!(r"(?i)above\s+\$(\d+(?:\.\d+)?)", |c| format!("above ${}", &c[1])),
];

/// Extract conditions in order of appearance, deduped preserving
/// first occurrence.
pub fn extract_conditions(normalized: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = std::collections::HashSet::new();
    for pattern in PATTERNS {
        for caps in pattern.regex.captures_iter(normalized) {
            let rendered = (pattern.render)(&caps);
            if seen.insert(rendered.clone()) {
                out.push(rendered);
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "conditions_tests.rs"]
mod tests;
