//! §4.5 steps 1–2: abbreviation expansion and keyword extraction.

use crate::lexicon::{ABBREVIATIONS, STOPWORDS};

/// Expand fixed abbreviations, whole-word and case-insensitive.
pub fn normalize(prompt: &str) -> String {
    prompt
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            let lower = bare.to_lowercase();
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == lower)
                .map(|(_, full)| word.replacen(bare, full, 1))
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, strip punctuation, drop stop-words and anything of
/// length ≤ 3, dedupe preserving first-seen order.
pub fn extract_keywords(normalized: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for word in normalized.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if cleaned.len() <= 3 || STOPWORDS.contains(&cleaned.as_str()) {
            continue;
        }
        if seen.insert(cleaned.clone()) {
            out.push(cleaned);
        }
    }
    out
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod tests;
