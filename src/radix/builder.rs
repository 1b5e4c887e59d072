use super::mask::compute_masks;
use super::traversal::traverse;
use super::{NodeId, NodeKind, RadixTree};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeSummary {
    pub nodes: usize,
    pub static_nodes: usize,
    pub param_nodes: usize,
    pub wildcard_nodes: usize,
    pub promoted_indexes: usize,
    pub routes: usize,
}

pub(super) fn seal(tree: &mut RadixTree) {
    if tree.is_sealed() {
        return;
    }

    let methods = compute_masks(&mut tree.arena, NodeId::ROOT);

    for raw in 0..tree.arena.len() {
        tree.arena[NodeId::from_raw(raw as u32)].set_sealed(true);
    }

    // registration-only state
    tree.constraint_cache.clear();
    tree.constraint_cache.shrink_to_fit();
    tree.arena.shrink_to_fit();
    tree.entries.shrink_to_fit();

    let summary = summarize(tree);
    tracing::event!(
        tracing::Level::DEBUG,
        operation = "seal",
        nodes = summary.nodes as u64,
        static_nodes = summary.static_nodes as u64,
        param_nodes = summary.param_nodes as u64,
        wildcard_nodes = summary.wildcard_nodes as u64,
        promoted_indexes = summary.promoted_indexes as u64,
        routes = summary.routes as u64,
        methods = ?methods,
        "radix tree sealed"
    );
}

pub fn summarize(tree: &RadixTree) -> TreeSummary {
    let mut summary = TreeSummary {
        routes: tree.route_count(),
        ..TreeSummary::default()
    };

    traverse(&tree.arena, NodeId::ROOT, |_, node| {
        summary.nodes += 1;
        match node.kind {
            NodeKind::Static => summary.static_nodes += 1,
            NodeKind::Param => summary.param_nodes += 1,
            NodeKind::Wildcard(_) => summary.wildcard_nodes += 1,
        }
        if node.static_children.is_promoted() {
            summary.promoted_indexes += 1;
        }
    });

    summary
}
