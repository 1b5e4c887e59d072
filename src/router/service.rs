use crate::errors::{RouterError, RouterResult};
use crate::readonly::RouterReadOnly;
use crate::registry::{RegistryMetrics, RouteRegistry};
use crate::router::RouterOptions;
use crate::types::{HttpMethod, RouteEntry, RouteKey, RouteMatch, RouteSpec};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::OnceLock;

#[derive(Debug)]
struct RouterState<H> {
    registry: RouteRegistry<H>,
    readonly: OnceLock<Arc<RouterReadOnly<H>>>,
}

impl<H> RouterState<H> {
    fn new(options: RouterOptions) -> Self {
        Self {
            registry: RouteRegistry::new(options),
            readonly: OnceLock::new(),
        }
    }
}

/// Route table with a registration phase followed by a sealed lookup phase.
///
/// Routes are added while the router is mutable; `seal` freezes them into a
/// `RouterReadOnly` snapshot that serves every later `find`.
#[derive(Debug)]
pub struct Router<H> {
    inner: RwLock<RouterState<H>>,
}

impl<H> Router<H> {
    /// Creates a router with `options`, or the defaults when `None`.
    ///
    /// Options are taken as given. Call `RouterOptions::validate` (or build
    /// them through `RouterOptions::builder()`) to have them checked first.
    /// A zero `cache_capacity` reaching this point is treated as one entry.
    pub fn new(options: Option<RouterOptions>) -> Self {
        let state = RouterState::new(options.unwrap_or_default());
        Self {
            inner: RwLock::new(state),
        }
    }

    pub fn add(&self, method: HttpMethod, path: &str, handler: H) -> RouterResult<RouteKey> {
        let mut guard = self.inner.write();

        if guard.readonly.get().is_some() {
            return Err(RouterError::AddWhileSealed {
                path: path.to_string(),
            });
        }

        Ok(guard.registry.insert(method, path, handler)?)
    }

    pub fn add_route(&self, spec: RouteSpec<H>) -> RouterResult<RouteKey> {
        self.add(spec.method, &spec.path, spec.handler)
    }

    pub fn add_bulk<I>(&self, entries: I) -> RouterResult<Vec<RouteKey>>
    where
        I: IntoIterator<Item = RouteSpec<H>>,
    {
        let mut guard = self.inner.write();

        if guard.readonly.get().is_some() {
            let count = entries.into_iter().count();
            return Err(RouterError::BulkAddWhileSealed { count });
        }

        Ok(guard.registry.insert_bulk(entries)?)
    }

    /// Freezes the routes registered so far. Sealing twice is a no-op.
    pub fn seal(&self) {
        let mut guard = self.inner.write();

        if guard.readonly.get().is_some() {
            return;
        }

        guard.registry.finalize();
        let options = guard.registry.tree().options().clone();
        let registry = std::mem::replace(&mut guard.registry, RouteRegistry::new(options));
        let snapshot = RouterReadOnly::from_registry(registry);
        let _ = guard.readonly.set(Arc::new(snapshot));
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.inner.read().readonly.get().is_some()
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> RouterResult<Option<RouteMatch<H>>> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => ro.find(method, path),
            None => Err(RouterError::FindWhileMutable),
        }
    }

    pub fn get_readonly(&self) -> RouterResult<Arc<RouterReadOnly<H>>> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => Ok(ro.clone()),
            None => Err(RouterError::ReadOnlyUnavailable),
        }
    }

    /// Registered routes, from the snapshot once sealed.
    pub fn routes(&self) -> Vec<RouteEntry> {
        let guard = self.inner.read();

        match guard.readonly.get() {
            Some(ro) => ro.routes().to_vec(),
            None => guard.registry.routes().to_vec(),
        }
    }

    /// Registration counters; reset once the router is sealed.
    pub fn registry_metrics(&self) -> RegistryMetrics {
        self.inner.read().registry.metrics().clone()
    }
}
