use parking_lot::Mutex;
use std::sync::Arc;

use super::cache::{CacheStats, CachedRoute, RouteCache};
use super::cache_index::CacheIndex;
use crate::enums::HttpMethod;
use crate::errors::RouterResult;
use crate::matcher::{MatchInput, Params, find_route};
use crate::path::{split_segments, validate_match_path};
use crate::radix::{RadixTree, TreeSummary, summarize};
use crate::registry::RouteRegistry;
use crate::types::{RouteEntry, RouteKey, RouteMatch};

/// LRU and its reverse index move together under one lock.
#[derive(Debug)]
struct CacheState {
    lru: RouteCache,
    index: CacheIndex,
}

impl CacheState {
    fn insert(&mut self, key: String, value: CachedRoute) {
        let path = value.path.clone();
        if let Some((evicted_key, evicted)) = self.lru.insert(key.clone(), value) {
            self.index.remove(&evicted.path, &evicted_key);
        }
        self.index.add(&path, key);
    }

    fn evict(&mut self, keys: Vec<String>) -> usize {
        let mut removed = 0;
        for key in keys {
            if let Some(entry) = self.lru.remove(&key) {
                self.index.remove(&entry.path, &key);
                removed += 1;
            }
        }
        removed
    }
}

/// Sealed, read-only view of a router. Lookups never touch the tree; the
/// optional result cache is the only mutable state.
#[derive(Debug)]
pub struct RouterReadOnly<H> {
    tree: RadixTree,
    handlers: Vec<Arc<H>>,
    cache: Option<Mutex<CacheState>>,
    cache_stats: Option<CacheStats>,
    debug: bool,
}

impl<H> RouterReadOnly<H> {
    pub fn from_registry(registry: RouteRegistry<H>) -> Self {
        let (mut tree, handlers) = registry.into_parts();
        tree.seal();

        let options = tree.options();
        let cache = options.cache_routes.then(|| {
            Mutex::new(CacheState {
                lru: RouteCache::new(options.cache_capacity),
                index: CacheIndex::new(),
            })
        });
        let cache_stats = cache.as_ref().map(|_| CacheStats::default());
        let debug = options.debug;

        RouterReadOnly {
            tree,
            handlers,
            cache,
            cache_stats,
            debug,
        }
    }

    #[tracing::instrument(level = "trace", skip(self, path), fields(method=?method, path=%path))]
    pub fn find(&self, method: HttpMethod, path: &str) -> RouterResult<Option<RouteMatch<H>>> {
        tracing::event!(tracing::Level::TRACE, operation="find", method=?method, path=%path);

        validate_match_path(path)?;

        let options = self.tree.options();
        let original = split_segments(path, options.ignore_trailing_slash);
        let canonical = canonical_path(&original);
        let lowered = (!options.case_sensitive && path.bytes().any(|b| b.is_ascii_uppercase()))
            .then(|| path.to_ascii_lowercase());
        let cache_key = self
            .cache
            .as_ref()
            .map(|_| format!("{}:{}", method.as_str(), canonical));

        if let (Some(cache), Some(key)) = (self.cache.as_ref(), cache_key.as_ref()) {
            let hit = cache.lock().lru.get(key);
            if let Some(stats) = &self.cache_stats {
                match hit {
                    Some(_) => stats.record_hit(),
                    None => stats.record_miss(),
                }
            }
            if self.debug {
                tracing::event!(
                    tracing::Level::DEBUG,
                    cache = if hit.is_some() { "hit" } else { "miss" },
                    method = ?method,
                    cache_key = %key,
                    "router cache lookup"
                );
            }
            if let Some(hit) = hit {
                return Ok(self.build_match(method, hit.route_key, hit.params));
            }
        }

        let lowered_segments = lowered
            .as_deref()
            .map(|p| split_segments(p, options.ignore_trailing_slash));
        let lookup = lowered_segments
            .as_deref()
            .unwrap_or(original.as_slice());

        let mut params = Params::new();
        let input = MatchInput {
            method,
            lookup,
            original: &original,
        };
        let Some(route_key) = find_route(&self.tree, input, &mut params)? else {
            return Ok(None);
        };

        if let (Some(cache), Some(key)) = (self.cache.as_ref(), cache_key) {
            // the index path is folded whenever the lookup is
            let indexed = match lowered_segments.as_deref() {
                Some(folded) => canonical_path(folded),
                None => canonical,
            };
            cache.lock().insert(
                key,
                CachedRoute {
                    route_key,
                    params: params.clone(),
                    path: indexed,
                },
            );
        }

        Ok(self.build_match(method, route_key, params))
    }

    fn build_match(&self, method: HttpMethod, key: RouteKey, params: Params) -> Option<RouteMatch<H>> {
        let handler = self.handlers.get(key as usize)?.clone();
        let pattern = self.tree.entries().get(key as usize)?.path.clone();
        Some(RouteMatch {
            key,
            method,
            handler,
            pattern,
            params,
        })
    }

    /// Drops cached results for exactly `path`, optionally for one method
    /// only. Returns how many entries went away.
    pub fn invalidate_path(&self, path: &str, method: Option<HttpMethod>) -> usize {
        self.invalidate(path, method, false)
    }

    /// Drops cached results for `path` and every path below it.
    pub fn invalidate_prefix(&self, path: &str, method: Option<HttpMethod>) -> usize {
        self.invalidate(path, method, true)
    }

    fn invalidate(&self, path: &str, method: Option<HttpMethod>, subtree: bool) -> usize {
        let Some(cache) = self.cache.as_ref() else {
            return 0;
        };

        let options = self.tree.options();
        let segments = split_segments(path, options.ignore_trailing_slash);
        let mut canonical = canonical_path(&segments);
        if !options.case_sensitive {
            canonical.make_ascii_lowercase();
        }
        let method_prefix = method
            .map(|m| format!("{}:", m.as_str()))
            .unwrap_or_default();

        let mut state = cache.lock();
        let mut keys = Vec::new();
        if subtree {
            state.index.collect_prefix(&canonical, &method_prefix, &mut keys);
        } else {
            state.index.collect_exact(&canonical, &method_prefix, &mut keys);
        }
        let removed = state.evict(keys);

        tracing::event!(
            tracing::Level::DEBUG,
            operation = "invalidate",
            path = %canonical,
            subtree,
            removed = removed as u64
        );
        removed
    }

    /// `(hits, misses)` since sealing, `None` when caching is disabled.
    pub fn cache_metrics(&self) -> Option<(u64, u64)> {
        self.cache_stats.as_ref().map(|stats| stats.snapshot())
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().lru.len())
    }

    pub fn routes(&self) -> &[RouteEntry] {
        self.tree.entries()
    }

    pub fn summary(&self) -> TreeSummary {
        summarize(&self.tree)
    }
}

fn canonical_path(segments: &[&str]) -> String {
    let mut out = String::with_capacity(1 + segments.iter().map(|s| s.len() + 1).sum::<usize>());
    out.push('/');
    out.push_str(&segments.join("/"));
    out
}
