//! §4.5 step 8: the entity map of unambiguous brand names, keyed by
//! the data-source tag they unilaterally confirm.

use std::collections::{BTreeMap, BTreeSet};

/// `(brand, source_tag)`. Brand names are never generic words, so a
/// single match is enough to confirm the source without the
/// disambiguation pass in `data_sources`.
pub const ENTITY_BRANDS: &[(&str, &str)] = &[
    ("chainlink", "price-feed"),
    ("coingecko", "price-feed"),
    ("coinmarketcap", "price-feed"),
    ("pyth", "price-feed"),
    ("uniswap", "defi-api"),
    ("aave", "defi-api"),
    ("curve", "defi-api"),
    ("sushiswap", "defi-api"),
    ("coindesk", "news-api"),
    ("cointelegraph", "news-api"),
    ("theblock", "news-api"),
];

/// Scan `normalized` for brand names, grouped by the source tag each
/// confirms.
pub fn extract_entities(normalized: &str) -> BTreeMap<String, BTreeSet<String>> {
    let lower = normalized.to_lowercase();
    let mut entities: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (brand, tag) in ENTITY_BRANDS {
        if lower.contains(brand) {
            entities.entry(tag.to_string()).or_default().insert(brand.to_string());
        }
    }
    entities
}

#[cfg(test)]
#[path = "entities_tests.rs"]
mod tests;
