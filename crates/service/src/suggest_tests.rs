use super::*;
use forge_core::PipelineId;

fn record(id: &str) -> PipelineRecord {
    PipelineRecord {
        id: PipelineId::new(id),
        steps: Vec::new(),
        active: true,
        execution_count: 0,
    }
}

#[test]
fn empty_cache_misses() {
    let cache = SuggestCache::new();
    assert!(cache.get().is_none());
}

#[test]
fn set_then_get_returns_the_same_entry() {
    let cache = SuggestCache::new();
    cache.set(vec![record("p1")]);
    let got = cache.get().unwrap();
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].id, PipelineId::new("p1"));
}

#[test]
fn clone_shares_the_same_slot() {
    let cache = SuggestCache::new();
    let clone = cache.clone();
    clone.set(vec![record("p1")]);
    assert!(cache.get().is_some());
}
