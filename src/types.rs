use std::fmt;
use std::sync::Arc;

pub use crate::enums::HttpMethod;
pub use crate::matcher::Params;

pub type RouteKey = u16;

/// One route as handed over by the registration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec<H> {
    pub method: HttpMethod,
    pub path: String,
    pub handler: H,
}

impl<H> RouteSpec<H> {
    pub fn new(method: HttpMethod, path: impl Into<String>, handler: H) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
        }
    }
}

/// A registered route as the engine keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub key: RouteKey,
    pub method: HttpMethod,
    pub path: Arc<str>,
    pub param_names: Vec<Arc<str>>,
}

/// Successful lookup result.
pub struct RouteMatch<H> {
    pub key: RouteKey,
    pub method: HttpMethod,
    pub handler: Arc<H>,
    pub pattern: Arc<str>,
    pub params: Params,
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            method: self.method,
            handler: self.handler.clone(),
            pattern: self.pattern.clone(),
            params: self.params.clone(),
        }
    }
}

impl<H: fmt::Debug> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("key", &self.key)
            .field("method", &self.method)
            .field("handler", &self.handler)
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish()
    }
}
