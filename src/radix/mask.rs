use super::node::MethodMask;
use super::traversal::post_order;
use super::{NodeArena, NodeId};

/// Computes and stores the method mask of every node reachable from `root`:
/// the node's own methods plus everything below it.
pub(super) fn compute_masks(arena: &mut NodeArena, root: NodeId) -> MethodMask {
    for id in post_order(arena, root) {
        let node = &arena[id];
        let mask = node
            .children()
            .fold(node.own_method_mask(), |acc, child| {
                acc | arena[child].method_mask
            });
        arena[id].method_mask = mask;
    }

    arena[root].method_mask
}
