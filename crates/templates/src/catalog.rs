//! The fixed template catalog and its precomputed IDF weights (§3,
//! §4.6). The set is fixed at program start — there is no runtime
//! registration path.

use forge_core::{TemplateDefinition, TriggerType};
use std::collections::HashMap;
use std::sync::LazyLock;

macro_rules! template {
    ($id:expr, $name:expr, $category:expr, [$($kw:expr),* $(,)?], [$($cap:expr),* $(,)?], $trigger:expr, $seed:expr) => {
        TemplateDefinition {
            id: $id,
            name: $name.to_string(),
            category: $category.to_string(),
            keywords: vec![$($kw.to_string()),*],
            required_capabilities: vec![$($cap.to_string()),*],
            expected_trigger: $trigger,
            prompt_seed: $seed.to_string(),
        }
    };
}

/// The fixed catalog. Template 1 (price alert) is the one exercised by
/// the S1 fixture (`intent.trigger_type=="cron"`, `template.id==1`).
///
/// `required_capabilities` mixes runtime capability tags (`trigger`,
/// `httpClient`, `evmClient`, `consensus`) with the data-source/action
/// vocabulary the matcher scores overlap against (§4.6).
pub static CATALOG: LazyLock<Vec<TemplateDefinition>> = LazyLock::new(|| {
    vec![
        template!(
            1,
            "price-threshold-alert",
            "monitoring",
            ["price", "alert", "drops", "rises", "threshold", "below", "above"],
            ["trigger", "httpClient", "price-feed", "alert"],
            TriggerType::Cron,
            "A scheduled workflow that polls a price feed and emits an alert when a threshold condition is met."
        ),
        template!(
            2,
            "onchain-event-watcher",
            "monitoring",
            ["event", "log", "emit", "contract", "watch", "onchain"],
            ["trigger", "evmClient", "onchain-write"],
            TriggerType::EvmLog,
            "Reacts to an onchain log event and performs a follow-up action."
        ),
        template!(
            3,
            "webhook-relay",
            "integration",
            ["webhook", "http", "endpoint", "request", "relay", "forward"],
            ["trigger", "httpClient"],
            TriggerType::Http,
            "Receives an HTTP webhook and relays its payload onward."
        ),
        template!(
            4,
            "scheduled-swap",
            "defi",
            ["swap", "dex", "amm", "schedule", "periodic", "slippage"],
            ["trigger", "evmClient", "defi-api", "swap"],
            TriggerType::Cron,
            "On a fixed schedule, executes a token swap through a DEX router."
        ),
        template!(
            5,
            "balance-rebalancer",
            "defi",
            ["balance", "rebalance", "portfolio", "wallet", "allocation"],
            ["trigger", "evmClient", "wallet-api", "transfer"],
            TriggerType::Cron,
            "Periodically checks wallet balances and rebalances toward target allocations."
        ),
        template!(
            6,
            "news-digest",
            "content",
            ["news", "headline", "digest", "summary", "breaking"],
            ["trigger", "httpClient", "news-api"],
            TriggerType::Cron,
            "Polls a news source on a schedule and emits a digest."
        ),
        template!(
            7,
            "weather-trigger",
            "automation",
            ["weather", "forecast", "temperature", "rain", "storm"],
            ["trigger", "httpClient", "weather-api"],
            TriggerType::Cron,
            "Triggers downstream action when a weather condition is met."
        ),
        template!(
            8,
            "social-sentiment-monitor",
            "monitoring",
            ["twitter", "tweet", "sentiment", "social", "mention"],
            ["trigger", "httpClient", "social-api", "alert"],
            TriggerType::Cron,
            "Tracks social sentiment and raises an alert on a spike."
        ),
        template!(
            9,
            "nft-mint-notifier",
            "nft",
            ["mint", "nft", "collection", "drop", "notify"],
            ["trigger", "evmClient", "mint", "alert"],
            TriggerType::EvmLog,
            "Watches for mint events on an NFT collection and notifies subscribers."
        ),
        template!(
            10,
            "consensus-price-oracle",
            "oracle",
            ["consensus", "oracle", "median", "aggregate", "feed"],
            ["trigger", "httpClient", "consensus", "price-feed"],
            TriggerType::Cron,
            "Aggregates multiple price sources with consensus reconciliation."
        ),
        template!(
            11,
            "cross-chain-bridge-monitor",
            "monitoring",
            ["bridge", "cross-chain", "multi-chain", "transfer", "watch"],
            ["trigger", "evmClient", "transfer"],
            TriggerType::EvmLog,
            "Watches bridge transfer events across multiple chains."
        ),
        template!(
            12,
            "staking-reward-claimer",
            "defi",
            ["stake", "staking", "reward", "claim", "compound"],
            ["trigger", "evmClient", "defi-api", "stake"],
            TriggerType::Cron,
            "On a schedule, claims and optionally compounds staking rewards."
        ),
    ]
});

/// IDF(k) = ln(N / df(k)), N = catalog size, df(k) = number of
/// templates whose keyword list contains k (exact string), precomputed
/// once at process start (§3).
pub static IDF: LazyLock<HashMap<String, f64>> = LazyLock::new(|| {
    let n = CATALOG.len() as f64;
    let mut df: HashMap<String, usize> = HashMap::new();
    for t in CATALOG.iter() {
        for kw in &t.keywords {
            *df.entry(kw.clone()).or_insert(0) += 1;
        }
    }
    df.into_iter()
        .map(|(kw, count)| (kw, (n / count as f64).ln()))
        .collect()
});

pub fn idf(keyword: &str) -> f64 {
    IDF.get(keyword).copied().unwrap_or(0.0)
}

pub fn by_id(id: u32) -> Option<&'static TemplateDefinition> {
    CATALOG.iter().find(|t| t.id == id)
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
