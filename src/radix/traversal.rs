use super::{NodeArena, NodeId, RadixTreeNode};

const TRAVERSAL_STACK_CAPACITY: usize = 64;

/// Depth-first traversal from `root`.
/// Uses an explicit stack to avoid recursion on deep trees.
#[inline]
pub(super) fn traverse<F>(arena: &NodeArena, root: NodeId, mut action: F)
where
    F: FnMut(NodeId, &RadixTreeNode),
{
    let mut stack: Vec<NodeId> = Vec::with_capacity(TRAVERSAL_STACK_CAPACITY);
    stack.push(root);

    while let Some(id) = stack.pop() {
        let node = &arena[id];
        action(id, node);
        stack.extend(node.children());
    }
}

/// Node ids ordered so that every child comes before its parent.
pub(super) fn post_order(arena: &NodeArena, root: NodeId) -> Vec<NodeId> {
    let mut pre: Vec<NodeId> = Vec::with_capacity(arena.len());
    traverse(arena, root, |id, _| pre.push(id));
    pre.reverse();
    pre
}
