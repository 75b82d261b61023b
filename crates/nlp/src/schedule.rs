//! §4.5 step 5: schedule extraction — exact, fuzzy-unit, then shorthand.

use crate::lexicon::edit_distance;
use regex::Regex;
use std::sync::LazyLock;

static EXACT_EVERY_N: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)every\s+(\d+)\s+(second|minute|hour|day)s?")
        .unwrap_or_else(|e| unreachable!("constant regex pattern is valid: {e}"))
});

static FUZZY_EVERY_N: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)every\s+(\d+)\s+(\w+)")
        .unwrap_or_else(|e| unreachable!("constant regex pattern is valid: {e}"))
});

static EVERY_DAY_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)every\s+day\s+at\s+(\d{1,2})\s*(am|pm)")
        .unwrap_or_else(|e| unreachable!("constant regex pattern is valid: {e}"))
});

const UNIT_WORDS: &[&str] = &["second", "minute", "hour", "day"];
const WEEKDAYS: &[&str] = &[
    "sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

/// Builds a 5-field cron (hour/day/week units) or 6-field (seconds
/// unit) expression from `n` repeated every `unit`.
fn cron_for(n: u32, unit: &str) -> String {
    match unit {
        "second" => format!("*/{n} * * * * *"),
        "minute" => format!("*/{n} * * * *"),
        "hour" => format!("0 */{n} * * *"),
        "day" => format!("0 0 */{n} * *"),
        _ => format!("*/{n} * * * *"),
    }
}

/// Three-phase schedule extraction: exact unit match, fuzzy unit
/// match (edit distance 2 on the unit word), then fixed shorthand
/// phrases.
pub fn extract_schedule(normalized: &str) -> Option<String> {
    if let Some(caps) = EXACT_EVERY_N.captures(normalized) {
        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
        let unit = caps.get(2)?.as_str().to_lowercase();
        return Some(cron_for(n, &unit));
    }

    if let Some(caps) = FUZZY_EVERY_N.captures(normalized) {
        let n: u32 = caps.get(1)?.as_str().parse().ok()?;
        let word = caps.get(2)?.as_str().to_lowercase();
        if let Some(unit) = UNIT_WORDS
            .iter()
            .find(|u| edit_distance(&word, u) <= 2)
        {
            return Some(cron_for(n, unit));
        }
    }

    let lower = normalized.to_lowercase();
    if let Some(caps) = EVERY_DAY_AT.captures(&lower) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let meridiem = caps.get(2)?.as_str();
        let hour24 = match (hour % 12, meridiem) {
            (h, "pm") => h + 12,
            (h, _) => h,
        };
        return Some(format!("0 {hour24} * * *"));
    }
    if lower.contains("hourly") {
        return Some("0 * * * *".to_string());
    }
    if lower.contains("daily") {
        return Some("0 0 * * *".to_string());
    }
    if lower.contains("weekly") {
        return Some("0 0 * * 0".to_string());
    }
    for (i, day) in WEEKDAYS.iter().enumerate() {
        if lower.contains(day) {
            return Some(format!("0 0 * * {i}"));
        }
    }
    None
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
