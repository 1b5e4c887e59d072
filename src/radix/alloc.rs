use core::ops::{Index, IndexMut};

use super::RadixTreeNode;

pub(crate) const INITIAL_ARENA_CAPACITY: usize = 256;

/// Index of a node inside a `NodeArena`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Flat storage for every node of a tree. Nodes are never freed individually;
/// the whole arena goes away with its tree.
#[derive(Debug)]
pub(crate) struct NodeArena {
    nodes: Vec<RadixTreeNode>,
}

impl NodeArena {
    pub fn with_root() -> Self {
        let mut nodes = Vec::with_capacity(INITIAL_ARENA_CAPACITY);
        nodes.push(RadixTreeNode::new_static(Default::default()));
        Self { nodes }
    }

    #[inline]
    pub fn alloc(&mut self, node: RadixTreeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
        for node in self.nodes.iter_mut() {
            node.shrink_to_fit();
        }
    }
}

impl Index<NodeId> for NodeArena {
    type Output = RadixTreeNode;

    #[inline(always)]
    fn index(&self, id: NodeId) -> &Self::Output {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for NodeArena {
    #[inline(always)]
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        &mut self.nodes[id.index()]
    }
}
