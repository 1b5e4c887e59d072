use crate::matcher::Params;
use crate::types::RouteKey;
use hashbrown::HashMap as FastHashMap;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// A cached lookup outcome. `path` is the canonical request path the entry
/// was indexed under, so an eviction can be mirrored in the `CacheIndex`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRoute {
    pub route_key: RouteKey,
    pub params: Params,
    pub path: String,
}

#[derive(Debug)]
pub struct RouteCache {
    capacity: usize,
    map: FastHashMap<String, CachedRoute>,
    order: VecDeque<String>,
}

impl RouteCache {
    pub fn new(capacity: usize) -> Self {
        let cap = capacity.max(1);
        Self {
            capacity: cap,
            map: FastHashMap::with_capacity(cap),
            order: VecDeque::with_capacity(cap),
        }
    }

    #[cfg(test)]
    fn peek(&self, key: &str) -> Option<&CachedRoute> {
        self.map.get(key)
    }

    /// Returns a copy of the entry and marks it most recently used.
    pub fn get(&mut self, key: &str) -> Option<CachedRoute> {
        let hit = self.map.get(key).cloned()?;
        self.promote(key);
        Some(hit)
    }

    /// Inserts or refreshes `key`. Returns the entry evicted to make room.
    pub fn insert(&mut self, key: String, value: CachedRoute) -> Option<(String, CachedRoute)> {
        if let Some(entry) = self.map.get_mut(&key) {
            *entry = value;
            self.promote(&key);
            return None;
        }

        let mut evicted = None;
        if self.order.len() == self.capacity
            && let Some(oldest) = self.order.pop_back()
            && let Some(old) = self.map.remove(&oldest)
        {
            evicted = Some((oldest, old));
        }

        self.order.push_front(key.clone());
        self.map.insert(key, value);
        evicted
    }

    pub fn remove(&mut self, key: &str) -> Option<CachedRoute> {
        let removed = self.map.remove(key)?;
        if let Some(pos) = self.order.iter().position(|existing| existing == key) {
            self.order.remove(pos);
        }
        Some(removed)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn promote(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|existing| existing == key)
            && let Some(k) = self.order.remove(pos)
        {
            self.order.push_front(k);
        }
    }
}

#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CacheStats {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}
