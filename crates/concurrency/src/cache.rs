//! C2 — a bounded LRU cache with per-instance TTL and lazy expiry.
//!
//! No background sweeper: an expired entry is only reclaimed the next
//! time it's looked up (or evicted ordinarily by the LRU policy).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

struct Inner<K, V> {
    capacity: usize,
    ttl: Duration,
    map: HashMap<K, Entry<V>>,
    /// MRU at the back, LRU at the front.
    order: Vec<K>,
}

/// Thread-safe LRU+TTL cache. Clone shares the same backing store.
#[derive(Clone)]
pub struct LruTtlCache<K, V> {
    inner: Arc<Mutex<Inner<K, V>>>,
}

impl<K, V> LruTtlCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                capacity: capacity.max(1),
                ttl,
                map: HashMap::new(),
                order: Vec::new(),
            })),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.lock();
        let now = Instant::now();
        let expired = match inner.map.get(key) {
            Some(entry) => entry.expires_at <= now,
            None => return None,
        };
        if expired {
            inner.map.remove(key);
            inner.order.retain(|k| k != key);
            return None;
        }
        touch_mru(&mut inner.order, key);
        inner.map.get(key).map(|e| e.value.clone())
    }

    pub fn set(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let ttl = inner.ttl;
        let now = Instant::now();

        if !inner.map.contains_key(&key) && inner.map.len() >= inner.capacity {
            if let Some(lru_key) = inner.order.first().cloned() {
                inner.map.remove(&lru_key);
                inner.order.remove(0);
            }
        }

        inner.map.insert(
            key.clone(),
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
        touch_mru(&mut inner.order, &key);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn touch_mru<K: Clone + Eq>(order: &mut Vec<K>, key: &K) {
    order.retain(|k| k != key);
    order.push(key.clone());
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
