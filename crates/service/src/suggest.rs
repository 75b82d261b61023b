//! `GET /pipelines/suggest` (§6: "cached 5 min, single entry, keyed
//! statically") — a one-slot TTL cache around whatever expensive
//! lookup backs the suggestion list, reusing C2 instead of inventing a
//! bespoke single-value cache type.

use forge_concurrency::LruTtlCache;
use forge_core::PipelineRecord;
use std::time::Duration;

const SUGGEST_TTL: Duration = Duration::from_secs(5 * 60);
/// The cache is keyed statically (§6): there is exactly one slot, so
/// the key is a unit value rather than anything request-derived.
const SUGGEST_KEY: () = ();

#[derive(Clone)]
pub struct SuggestCache {
    inner: LruTtlCache<(), Vec<PipelineRecord>>,
}

impl SuggestCache {
    pub fn new() -> Self {
        Self {
            inner: LruTtlCache::new(1, SUGGEST_TTL),
        }
    }

    pub fn get(&self) -> Option<Vec<PipelineRecord>> {
        self.inner.get(&SUGGEST_KEY)
    }

    pub fn set(&self, suggestions: Vec<PipelineRecord>) {
        self.inner.set(SUGGEST_KEY, suggestions);
    }
}

impl Default for SuggestCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "suggest_tests.rs"]
mod tests;
