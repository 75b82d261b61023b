//! §4.5 step 8: data-source resolution with the disambiguation pass.
//!
//! Every source carries a list of *confirming* keys — words that mean
//! that source and nothing else (`"defi"`, `"headline"`). Generic
//! words that also show up in unrelated prompts (`"pool"`, `"score"`,
//! `"balance"`, `"article"`, `"exchange"`, `"match"`, `"address"`) are
//! deliberately left out of every list below: per §4.5 step 8 they
//! cannot unilaterally elect a source, so the simplest implementation
//! of the disambiguation pass is to never treat them as confirming in
//! the first place. An entity-map brand hit (§4.5 step 8, `entities`)
//! also confirms a source on its own.

use crate::lexicon::tiered_key_matches;
use std::collections::{BTreeMap, BTreeSet};

struct SourceDef {
    tag: &'static str,
    confirming: &'static [&'static str],
}

const SOURCES: &[SourceDef] = &[
    SourceDef {
        tag: "price-feed",
        confirming: &["price", "oracle", "feed", "quote"],
    },
    SourceDef {
        tag: "defi-api",
        confirming: &["defi", "liquidity", "amm", "dex", "swap"],
    },
    SourceDef {
        tag: "news-api",
        confirming: &["news", "headline", "breaking"],
    },
    SourceDef {
        tag: "weather-api",
        confirming: &["weather", "forecast", "temperature"],
    },
    SourceDef {
        tag: "sports-api",
        confirming: &["sports", "tournament", "league"],
    },
    SourceDef {
        tag: "social-api",
        confirming: &["twitter", "tweet", "sentiment"],
    },
    SourceDef {
        tag: "wallet-api",
        confirming: &["wallet", "holdings"],
    },
];

fn push_unique(out: &mut Vec<String>, tag: &str) {
    if !out.iter().any(|t| t == tag) {
        out.push(tag.to_string());
    }
}

pub fn extract_data_sources(
    normalized: &str,
    keywords: &[String],
    entities: &BTreeMap<String, BTreeSet<String>>,
) -> Vec<String> {
    let lower = normalized.to_lowercase();
    let mut out = Vec::new();
    for src in SOURCES {
        let confirmed = entities.contains_key(src.tag)
            || src.confirming.iter().any(|k| tiered_key_matches(&lower, keywords, k));
        if confirmed {
            push_unique(&mut out, src.tag);
        }
    }
    out
}

#[cfg(test)]
#[path = "data_sources_tests.rs"]
mod tests;
