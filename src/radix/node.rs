use bitflags::bitflags;
use smallvec::SmallVec;
use std::sync::Arc;

use super::{HTTP_METHOD_COUNT, NodeId, StaticChildIndex};
use crate::enums::HttpMethod;
use crate::pattern::{PatternTester, WildcardOrigin};
use crate::types::RouteKey;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        const SEALED = 0b00000001;
        // param node declared with an explicit `(regex)`
        const CONSTRAINED = 0b00000010;
    }
}

bitflags! {
    /// One bit per `HttpMethod`, in discriminant order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodMask: u8 {
        const GET = 1 << 0;
        const POST = 1 << 1;
        const PUT = 1 << 2;
        const DELETE = 1 << 3;
        const PATCH = 1 << 4;
        const HEAD = 1 << 5;
        const OPTIONS = 1 << 6;
    }
}

impl From<HttpMethod> for MethodMask {
    #[inline(always)]
    fn from(method: HttpMethod) -> Self {
        MethodMask::from_bits_truncate(1 << method.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Static,
    Param,
    Wildcard(WildcardOrigin),
}

#[derive(Debug)]
pub struct RadixTreeNode {
    pub(crate) kind: NodeKind,
    // consecutive literal segments collapsed into one node; empty on the root
    pub(crate) segment_parts: SmallVec<[Box<str>; 2]>,
    pub(crate) param_name: Option<Arc<str>>,
    pub(crate) pattern: Option<Arc<PatternTester>>,
    pub(crate) static_children: StaticChildIndex,
    // kept in priority order, see `compare_param_priority`
    pub(crate) param_children: SmallVec<[NodeId; 4]>,
    pub(crate) wildcard_child: Option<NodeId>,
    pub(crate) routes: [Option<RouteKey>; HTTP_METHOD_COUNT],
    // methods reachable in this subtree, filled at seal
    pub(crate) method_mask: MethodMask,
    pub(crate) flags: NodeFlags,
}

impl RadixTreeNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            segment_parts: SmallVec::new(),
            param_name: None,
            pattern: None,
            static_children: StaticChildIndex::new(),
            param_children: SmallVec::new(),
            wildcard_child: None,
            routes: [None; HTTP_METHOD_COUNT],
            method_mask: MethodMask::empty(),
            flags: NodeFlags::empty(),
        }
    }

    pub(crate) fn new_static(parts: SmallVec<[Box<str>; 2]>) -> Self {
        let mut node = Self::with_kind(NodeKind::Static);
        node.segment_parts = parts;
        node
    }

    pub(crate) fn new_param(name: Arc<str>, tester: Arc<PatternTester>, constrained: bool) -> Self {
        let mut node = Self::with_kind(NodeKind::Param);
        node.param_name = Some(name);
        node.pattern = Some(tester);
        node.flags.set(NodeFlags::CONSTRAINED, constrained);
        node
    }

    pub(crate) fn new_wildcard(name: Arc<str>, origin: WildcardOrigin) -> Self {
        let mut node = Self::with_kind(NodeKind::Wildcard(origin));
        node.param_name = Some(name);
        node
    }

    #[inline(always)]
    pub(crate) fn is_sealed(&self) -> bool {
        self.flags.contains(NodeFlags::SEALED)
    }

    #[inline(always)]
    pub(crate) fn set_sealed(&mut self, sealed: bool) {
        self.flags.set(NodeFlags::SEALED, sealed);
    }

    /// Declared constraint source of a param node, `None` when unconstrained.
    #[inline]
    pub(crate) fn constraint_source(&self) -> Option<&str> {
        if self.flags.contains(NodeFlags::CONSTRAINED) {
            self.pattern.as_deref().map(PatternTester::source)
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn param_name(&self) -> &str {
        self.param_name.as_deref().unwrap_or_default()
    }

    #[inline]
    pub(crate) fn route(&self, method: HttpMethod) -> Option<RouteKey> {
        self.routes[method.index()]
    }

    pub(crate) fn own_method_mask(&self) -> MethodMask {
        HttpMethod::ALL
            .iter()
            .filter(|m| self.routes[m.index()].is_some())
            .fold(MethodMask::empty(), |acc, m| acc | MethodMask::from(*m))
    }

    /// Child ids in lookup precedence order.
    pub(crate) fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.static_children
            .iter()
            .map(|(_, id)| id)
            .chain(self.param_children.iter().copied())
            .chain(self.wildcard_child)
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.segment_parts.shrink_to_fit();
        self.static_children.shrink_to_fit();
        self.param_children.shrink_to_fit();
    }
}
