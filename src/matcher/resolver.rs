use crate::enums::HttpMethod;
use crate::matcher::Params;
use crate::pattern::PatternResult;
use crate::radix::{MethodMask, NodeId, NodeKind, RadixTree};
use crate::types::RouteKey;

/// Request segments prepared for lookup. `lookup` holds the text compared
/// against literal labels (lowercased for case-insensitive trees); `original`
/// holds the same segments as received and feeds parameter captures.
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub method: HttpMethod,
    pub lookup: &'a [&'a str],
    pub original: &'a [&'a str],
}

struct Ctx<'a> {
    tree: &'a RadixTree,
    input: MatchInput<'a>,
    mask: MethodMask,
}

/// Resolves `input` against a sealed tree.
///
/// `Ok(None)` is a plain miss. `Err` only surfaces a constraint that
/// overran its budget under `TimeoutPolicy::Error`.
pub fn find_route(
    tree: &RadixTree,
    input: MatchInput<'_>,
    params: &mut Params,
) -> PatternResult<Option<RouteKey>> {
    debug_assert_eq!(input.lookup.len(), input.original.len());
    let ctx = Ctx {
        tree,
        input,
        mask: MethodMask::from(input.method),
    };
    find_from(&ctx, NodeId::ROOT, 0, params)
}

fn find_from(
    ctx: &Ctx<'_>,
    id: NodeId,
    index: usize,
    params: &mut Params,
) -> PatternResult<Option<RouteKey>> {
    let arena = &ctx.tree.arena;
    let node = &arena[id];

    if !node.method_mask.intersects(ctx.mask) {
        return Ok(None);
    }

    let segments = ctx.input.lookup;
    if index == segments.len() {
        return Ok(handle_terminal(ctx, id, params));
    }

    let segment = segments[index];
    if let Some(child) = node.static_children.get_bytes(segment.as_bytes()) {
        let parts = &arena[child].segment_parts;
        let end = index + parts.len();
        if end <= segments.len()
            && parts[1..]
                .iter()
                .zip(&segments[index + 1..end])
                .all(|(part, seg)| part.as_ref() == *seg)
            && let Some(found) = find_from(ctx, child, end, params)?
        {
            return Ok(Some(found));
        }
    }

    let captured = ctx.input.original[index];
    for &child in node.param_children.iter() {
        let param = &arena[child];
        if !param.method_mask.intersects(ctx.mask) {
            continue;
        }
        let Some(tester) = param.pattern.as_deref() else {
            continue;
        };
        if !tester.test(captured, ctx.tree.timeout_guard())? {
            continue;
        }

        let checkpoint = params.len();
        if let Some(name) = param.param_name.as_ref() {
            params.push(name.clone(), captured.to_string());
        }
        if let Some(found) = find_from(ctx, child, index + 1, params)? {
            return Ok(Some(found));
        }
        params.truncate(checkpoint);
    }

    if let Some(child) = node.wildcard_child {
        let rest = &ctx.input.original[index..];
        // a lone trailing slash leaves nothing to capture
        if let [""] = rest {
            return Ok(empty_wildcard_match(ctx, child, params));
        }
        let wildcard = &arena[child];
        if let Some(key) = wildcard.route(ctx.input.method) {
            if let Some(name) = wildcard.param_name.as_ref() {
                params.push(name.clone(), rest.join("/"));
            }
            return Ok(Some(key));
        }
    }

    Ok(None)
}

/// End of input: the node's own handler, or an empty capture by a wildcard
/// child that accepts zero segments.
fn handle_terminal(ctx: &Ctx<'_>, id: NodeId, params: &mut Params) -> Option<RouteKey> {
    let arena = &ctx.tree.arena;
    let node = &arena[id];

    if let Some(key) = node.route(ctx.input.method) {
        return Some(key);
    }

    let child = node.wildcard_child?;
    empty_wildcard_match(ctx, child, params)
}

/// Matches the wildcard `child` against zero remaining segments.
fn empty_wildcard_match(ctx: &Ctx<'_>, child: NodeId, params: &mut Params) -> Option<RouteKey> {
    let wildcard = &ctx.tree.arena[child];
    let NodeKind::Wildcard(origin) = wildcard.kind else {
        return None;
    };
    if !origin.allows_empty() {
        return None;
    }
    let key = wildcard.route(ctx.input.method)?;
    if origin.records_empty()
        && let Some(name) = wildcard.param_name.as_ref()
    {
        params.push(name.clone(), String::new());
    }
    Some(key)
}
