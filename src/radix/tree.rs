use hashbrown::HashMap as FastHashMap;
use std::sync::Arc;

use super::{NodeArena, NodeId, RadixTreeNode};
use crate::pattern::{PatternTester, TimeoutGuard};
use crate::router::RouterOptions;
use crate::types::RouteEntry;

pub const HTTP_METHOD_COUNT: usize = 7;

// Fixed maximum routes across all builds for predictable key width
pub const MAX_ROUTES: u16 = 65_535;

#[derive(Debug)]
pub struct RadixTree {
    pub(crate) arena: NodeArena,
    pub(crate) options: RouterOptions,
    pub(crate) entries: Vec<RouteEntry>,
    // constraint source -> tester shared by every node declaring it
    pub(crate) constraint_cache: FastHashMap<Box<str>, Arc<PatternTester>>,
    pub(crate) unconstrained: Arc<PatternTester>,
    pub(crate) timeout_guard: TimeoutGuard,
}

impl RadixTree {
    pub fn new(options: RouterOptions) -> Self {
        let mut timeout_guard = TimeoutGuard::new(options.regex_timeout, options.timeout_policy);
        if let Some(observer) = options.timeout_observer.clone() {
            timeout_guard = timeout_guard.with_observer(observer);
        }

        Self {
            arena: NodeArena::with_root(),
            options,
            entries: Vec::new(),
            constraint_cache: FastHashMap::new(),
            unconstrained: Arc::new(PatternTester::unconstrained()),
            timeout_guard,
        }
    }

    #[inline]
    pub fn root(&self) -> &RadixTreeNode {
        &self.arena[NodeId::ROOT]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &RadixTreeNode {
        &self.arena[id]
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.root().is_sealed()
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn route_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    pub(crate) fn timeout_guard(&self) -> &TimeoutGuard {
        &self.timeout_guard
    }

    pub fn seal(&mut self) {
        super::builder::seal(self);
    }
}
