use std::sync::Arc;

use crate::enums::HttpMethod;
use crate::radix::{RadixResult, RadixTree};
use crate::registry::RegistryMetrics;
use crate::router::RouterOptions;
use crate::types::{RouteEntry, RouteKey, RouteSpec};

/// Registration-phase state: the tree under construction and the handlers,
/// indexed by route key.
#[derive(Debug)]
pub struct RouteRegistry<H> {
    tree: RadixTree,
    handlers: Vec<Arc<H>>,
    metrics: RegistryMetrics,
}

impl<H> RouteRegistry<H> {
    pub fn new(options: RouterOptions) -> Self {
        Self {
            tree: RadixTree::new(options),
            handlers: Vec::new(),
            metrics: RegistryMetrics::default(),
        }
    }

    pub fn insert(&mut self, method: HttpMethod, path: &str, handler: H) -> RadixResult<RouteKey> {
        let key = self.tree.insert(method, path).inspect_err(|_| {
            self.metrics.record_rejection();
        })?;
        debug_assert_eq!(key as usize, self.handlers.len());
        self.handlers.push(Arc::new(handler));
        self.metrics.record_insert();
        Ok(key)
    }

    /// Registers `specs` in order and stops at the first rejected one. Routes
    /// accepted before it stay registered.
    pub fn insert_bulk<I>(&mut self, specs: I) -> RadixResult<Vec<RouteKey>>
    where
        I: IntoIterator<Item = RouteSpec<H>>,
    {
        let specs = specs.into_iter();
        let mut out = Vec::with_capacity(specs.size_hint().0);
        let mut outcome = Ok(());

        for spec in specs {
            match self.tree.insert(spec.method, &spec.path) {
                Ok(key) => {
                    self.handlers.push(Arc::new(spec.handler));
                    out.push(key);
                }
                Err(err) => {
                    tracing::event!(
                        tracing::Level::TRACE,
                        operation = "insert_bulk",
                        accepted = out.len() as u64,
                        path = %spec.path,
                        error = %err
                    );
                    self.metrics.record_rejection();
                    outcome = Err(err);
                    break;
                }
            }
        }

        self.metrics.record_bulk(out.len());
        outcome.map(|_| out)
    }

    pub fn finalize(&mut self) {
        self.tree.seal();
    }

    pub fn tree(&self) -> &RadixTree {
        &self.tree
    }

    pub fn routes(&self) -> &[RouteEntry] {
        self.tree.entries()
    }

    pub fn metrics(&self) -> &RegistryMetrics {
        &self.metrics
    }

    pub fn into_parts(self) -> (RadixTree, Vec<Arc<H>>) {
        (self.tree, self.handlers)
    }
}
