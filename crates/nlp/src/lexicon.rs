//! C5 — fixed lexicons and the low-level string-matching primitives the
//! rest of the pipeline builds its tiered lookups on.

/// `min -> minute`, `tx -> transaction`, etc. Expanded as whole words
/// during normalization, case-insensitively.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("min", "minute"),
    ("mins", "minutes"),
    ("hr", "hour"),
    ("hrs", "hours"),
    ("sec", "second"),
    ("secs", "seconds"),
    ("tx", "transaction"),
    ("txs", "transactions"),
    ("addr", "address"),
    ("bal", "balance"),
    ("amt", "amount"),
    ("pct", "percent"),
    ("config", "configuration"),
];

/// Fixed stop-word set dropped from the keyword list.
pub const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "your", "have", "when", "then",
    "than", "will", "would", "could", "should", "what", "which", "there", "their", "about",
    "these", "those", "been", "being", "just", "also", "only", "very",
];

/// Negation markers; each poisons the next 5 content words.
pub const NEGATION_MARKERS: &[&str] = &[
    "not", "no", "never", "don't", "dont", "stop", "without", "isn't", "isnt", "won't", "wont",
    "can't", "cant", "cannot", "avoid", "skip",
];

/// State-management keywords that trigger the prompt's extra guidance
/// section (§4.7).
pub const STATE_KEYWORDS: &[&str] = &[
    "state", "persist", "store", "memory", "remember", "history", "previous", "accumulate",
];

/// Edit distance (Levenshtein) between two strings, operating on chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in dp[0].iter_mut().enumerate() {
        *val = j;
    }
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

/// The adaptive edit-distance budget used by every fuzzy tier (§4.5.4):
/// short words (≤ 7 chars) tolerate 1 edit, longer words tolerate 2.
pub fn fuzzy_budget(word: &str) -> usize {
    if word.chars().count() <= 7 {
        1
    } else {
        2
    }
}

/// Whether `word` fuzzy-matches `target` within the adaptive budget.
pub fn fuzzy_matches(word: &str, target: &str) -> bool {
    edit_distance(word, target) <= fuzzy_budget(word).max(fuzzy_budget(target))
}

/// A deliberately small suffix-stripping stemmer — not Porter-complete,
/// just enough to fold plurals/gerunds onto a shared root for the
/// tiered lookups (`"dropping" -> "dropp"`, `"prices" -> "price"`).
pub fn stem(word: &str) -> String {
    let w = word.to_lowercase();
    for suffix in ["ing", "edly", "ed", "es", "s"] {
        if w.len() > suffix.len() + 2 && w.ends_with(suffix) {
            return w[..w.len() - suffix.len()].to_string();
        }
    }
    w
}

/// Whether `word` stem-matches `target` (either normalized form, or
/// stems, are equal).
pub fn stem_matches(word: &str, target: &str) -> bool {
    word.eq_ignore_ascii_case(target) || stem(word) == stem(target)
}

/// The tiered single-key lookup shared by data-source and action
/// resolution (§4.5 steps 8–9): keys of length ≤ 3, and multi-word
/// keys, match by word boundary / substring against the normalized
/// text; longer single-word keys run the exact -> stemmed -> fuzzy
/// tiers against the already-extracted keyword list.
pub fn tiered_key_matches(normalized_lower: &str, keywords: &[String], key: &str) -> bool {
    if key.contains(' ') {
        return normalized_lower.contains(key);
    }
    if key.len() <= 3 {
        return normalized_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|w| w == key);
    }
    keywords
        .iter()
        .any(|kw| kw == key || stem_matches(kw, key) || fuzzy_matches(kw, key))
}

#[cfg(test)]
#[path = "lexicon_tests.rs"]
mod tests;
