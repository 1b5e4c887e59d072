use hashbrown::{HashMap as FastHashMap, HashSet as FastHashSet};

use crate::path::split_segments;

#[derive(Debug, Default)]
struct IndexNode {
    keys: Option<FastHashSet<String>>,
    children: FastHashMap<Box<str>, IndexNode>,
}

impl IndexNode {
    #[inline]
    fn is_prunable(&self) -> bool {
        self.children.is_empty() && self.keys.as_ref().is_none_or(FastHashSet::is_empty)
    }

    fn collect_own(&self, method_prefix: &str, acc: &mut Vec<String>) {
        if let Some(keys) = self.keys.as_ref() {
            acc.extend(keys.iter().filter(|k| k.starts_with(method_prefix)).cloned());
        }
    }

    fn collect_all(&self, method_prefix: &str, acc: &mut Vec<String>) {
        self.collect_own(method_prefix, acc);
        for child in self.children.values() {
            child.collect_all(method_prefix, acc);
        }
    }

    /// Removes `key` below this node; returns whether this node is now empty.
    fn remove(&mut self, segments: &[&str], key: &str) -> bool {
        match segments.split_first() {
            None => {
                if let Some(keys) = self.keys.as_mut() {
                    keys.remove(key);
                    if keys.is_empty() {
                        self.keys = None;
                    }
                }
            }
            Some((head, rest)) => {
                if let Some(child) = self.children.get_mut(*head)
                    && child.remove(rest, key)
                {
                    self.children.remove(*head);
                }
            }
        }
        self.is_prunable()
    }

    fn count(&self) -> usize {
        1 + self.children.values().map(IndexNode::count).sum::<usize>()
    }
}

/// Reverse index from request path to the cache keys computed for it, so a
/// path or a whole subtree can be invalidated without flushing the cache.
///
/// Paths are split with the same rules as lookups. Nodes left without keys
/// or children are pruned on removal.
#[derive(Debug, Default)]
pub struct CacheIndex {
    root: IndexNode,
}

impl CacheIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str, key: impl Into<String>) {
        let mut node = &mut self.root;
        for seg in split_segments(path, false) {
            node = node.children.entry(Box::from(seg)).or_default();
        }
        node.keys.get_or_insert_with(FastHashSet::default).insert(key.into());
    }

    pub fn remove(&mut self, path: &str, key: &str) {
        let segments = split_segments(path, false);
        self.root.remove(&segments, key);
    }

    /// Keys registered at exactly `path` whose text starts with `method_prefix`.
    pub fn collect_exact(&self, path: &str, method_prefix: &str, acc: &mut Vec<String>) {
        if let Some(node) = self.find(path) {
            node.collect_own(method_prefix, acc);
        }
    }

    /// Like `collect_exact`, plus every key registered below `path`.
    pub fn collect_prefix(&self, path: &str, method_prefix: &str, acc: &mut Vec<String>) {
        if let Some(node) = self.find(path) {
            node.collect_all(method_prefix, acc);
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_prunable()
    }

    /// Node count including the root.
    pub fn node_count(&self) -> usize {
        self.root.count()
    }

    fn find(&self, path: &str) -> Option<&IndexNode> {
        let mut node = &self.root;
        for seg in split_segments(path, false) {
            node = node.children.get(seg)?;
        }
        Some(node)
    }
}
