//! §4.5 step 9: action resolution. Always non-empty (defaults to the
//! onchain-write tag). `swap` additionally requires a confirming
//! token (`dex`, `amm`, `uniswap`, `slippage`, `router`); generic
//! commerce words (`buy`, `sell`, `trade`) never elect it alone.

use crate::lexicon::tiered_key_matches;
use forge_core::DEFAULT_ACTION;

struct ActionDef {
    tag: &'static str,
    confirming: &'static [&'static str],
}

const ACTIONS: &[ActionDef] = &[
    ActionDef {
        tag: "swap",
        confirming: &["dex", "amm", "uniswap", "slippage", "router"],
    },
    ActionDef {
        tag: "transfer",
        confirming: &["transfer", "send"],
    },
    ActionDef {
        tag: "stake",
        confirming: &["stake", "staking"],
    },
    ActionDef {
        tag: "mint",
        confirming: &["mint", "minting"],
    },
    ActionDef {
        tag: "burn",
        confirming: &["burn", "burning"],
    },
    ActionDef {
        tag: "alert",
        confirming: &["alert", "notify", "notification"],
    },
];

fn push_unique(out: &mut Vec<String>, tag: &str) {
    if !out.iter().any(|t| t == tag) {
        out.push(tag.to_string());
    }
}

pub fn extract_actions(normalized: &str, keywords: &[String]) -> Vec<String> {
    let lower = normalized.to_lowercase();
    let mut out = Vec::new();
    for def in ACTIONS {
        if def.confirming.iter().any(|k| tiered_key_matches(&lower, keywords, k)) {
            push_unique(&mut out, def.tag);
        }
    }
    if out.is_empty() {
        out.push(DEFAULT_ACTION.to_string());
    }
    out
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;
