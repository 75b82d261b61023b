//! §4.5 step 7: chain resolution — short-key word boundaries, then
//! long-key substrings, then fuzzy fallback, then cross-chain phrases.

use crate::lexicon::fuzzy_matches;
use forge_core::DEFAULT_CHAIN;

/// Keys of length ≤ 4, matched by word boundary only (prevents `"eth"`
/// matching inside `"ethics"`).
const SHORT_CHAIN_KEYS: &[(&str, &str)] = &[
    ("eth", "ethereum"),
    ("btc", "bitcoin"),
    ("bnb", "bsc"),
    ("sol", "solana"),
    ("base", "base"),
];

/// Keys of length > 4, matched by plain substring.
const LONG_CHAIN_KEYS: &[(&str, &str)] = &[
    ("ethereum", "ethereum"),
    ("polygon", "polygon"),
    ("avalanche", "avalanche"),
    ("arbitrum", "arbitrum"),
    ("optimism", "optimism"),
    ("binance", "bsc"),
    ("solana", "solana"),
];

/// The two chains a `cross-chain`/`multi-chain` phrase implies.
const CROSS_CHAIN_BASELINE: &[&str] = &["ethereum", "polygon"];

fn push_unique(out: &mut Vec<String>, chain: &str) {
    if !out.iter().any(|c| c == chain) {
        out.push(chain.to_string());
    }
}

pub fn extract_chains(normalized: &str, keywords: &[String]) -> Vec<String> {
    let lower = normalized.to_lowercase();
    let words: Vec<&str> = lower.split(|c: char| !c.is_alphanumeric()).collect();

    let mut chains = Vec::new();

    // Phase 1: short keys by word boundary, long keys by substring.
    for (key, canonical) in SHORT_CHAIN_KEYS {
        if words.iter().any(|w| w == key) {
            push_unique(&mut chains, canonical);
        }
    }
    for (key, canonical) in LONG_CHAIN_KEYS {
        if lower.contains(key) {
            push_unique(&mut chains, canonical);
        }
    }

    // Phase 2: fuzzy fallback against long keys only, when phase 1
    // found nothing.
    if chains.is_empty() {
        for kw in keywords.iter().filter(|k| k.len() > 3) {
            for (key, canonical) in LONG_CHAIN_KEYS {
                if fuzzy_matches(kw, key) {
                    push_unique(&mut chains, canonical);
                }
            }
        }
    }

    // Phase 3: explicit cross-chain / multi-chain phrasing.
    if lower.contains("cross-chain") || lower.contains("multi-chain") || lower.contains("multichain")
    {
        for chain in CROSS_CHAIN_BASELINE {
            push_unique(&mut chains, chain);
        }
    }

    if chains.is_empty() {
        chains.push(DEFAULT_CHAIN.to_string());
    }
    chains
}

#[cfg(test)]
#[path = "chains_tests.rs"]
mod tests;
