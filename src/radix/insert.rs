use hashbrown::HashSet;
use smallvec::SmallVec;
use std::sync::Arc;

use super::{MAX_ROUTES, NodeId, RadixError, RadixResult, RadixTree, RadixTreeNode};
use crate::enums::HttpMethod;
use crate::path::{PathError, is_allowed_literal_byte, validate_envelope};
use crate::pattern::{
    PatternTester, SegmentPattern, WildcardOrigin, check_pattern_safety, compare_param_priority,
    parse_segment, split_pattern_segments,
};
use crate::types::{RouteEntry, RouteKey};

/// A route segment after parsing, with its constraint already compiled.
#[derive(Debug, Clone)]
pub(crate) enum PreparedSegment {
    Literal(Box<str>),
    Param {
        name: Arc<str>,
        tester: Arc<PatternTester>,
        constrained: bool,
    },
    Wildcard {
        name: Arc<str>,
        origin: WildcardOrigin,
    },
}

impl PreparedSegment {
    #[inline]
    fn literal(&self) -> Option<&str> {
        match self {
            PreparedSegment::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    #[inline]
    fn constraint_source(&self) -> Option<&str> {
        match self {
            PreparedSegment::Param {
                tester,
                constrained: true,
                ..
            } => Some(tester.source()),
            _ => None,
        }
    }
}

impl RadixTree {
    /// Registers `path` for `method` and returns the new route key.
    ///
    /// Validation, constraint compilation and conflict detection all run
    /// before the first node is touched, so a rejected route leaves the tree
    /// exactly as it was.
    pub fn insert(&mut self, method: HttpMethod, path: &str) -> RadixResult<RouteKey> {
        tracing::event!(tracing::Level::TRACE, operation="insert", method=?method, path=%path);
        if self.is_sealed() {
            return Err(RadixError::TreeSealed {
                operation: "insert",
                path: Some(path.to_string()),
            });
        }

        let segments = self.prepare_path_segments(path)?;
        self.probe(method, path, &segments)?;
        Ok(self.commit(method, path, segments))
    }

    pub(crate) fn prepare_path_segments(&mut self, path: &str) -> RadixResult<Vec<PreparedSegment>> {
        validate_envelope(path)?;

        let raw = split_pattern_segments(path, self.options.ignore_trailing_slash)?;
        let total = raw.len();
        let mut parsed: Vec<SegmentPattern> = Vec::with_capacity(total);

        for (index, seg) in raw.iter().enumerate() {
            let pattern = parse_segment(seg)?;

            match &pattern {
                SegmentPattern::Literal(lit) => check_literal(path, lit)?,
                SegmentPattern::Wildcard { .. } if index + 1 != total => {
                    return Err(RadixError::WildcardMustBeTerminal {
                        segment_index: index,
                        total_segments: total,
                    });
                }
                _ => {}
            }

            parsed.push(pattern);
        }

        check_duplicate_names(path, &parsed)?;

        let mut out = Vec::with_capacity(total);
        for pattern in parsed {
            out.push(match pattern {
                SegmentPattern::Literal(lit) => {
                    let lit = if self.options.case_sensitive {
                        lit
                    } else {
                        lit.to_ascii_lowercase()
                    };
                    PreparedSegment::Literal(lit.into_boxed_str())
                }
                SegmentPattern::Param {
                    name,
                    constraint: None,
                } => PreparedSegment::Param {
                    name: name.into(),
                    tester: self.unconstrained.clone(),
                    constrained: false,
                },
                SegmentPattern::Param {
                    name,
                    constraint: Some(source),
                } => {
                    let tester = self.compile_constraint(&name, &source)?;
                    PreparedSegment::Param {
                        name: name.into(),
                        tester,
                        constrained: true,
                    }
                }
                SegmentPattern::Wildcard { name, origin } => PreparedSegment::Wildcard {
                    name: name.into(),
                    origin,
                },
            });
        }

        Ok(out)
    }

    fn compile_constraint(&mut self, name: &str, source: &str) -> RadixResult<Arc<PatternTester>> {
        if let Some(existing) = self.constraint_cache.get(source) {
            return Ok(existing.clone());
        }

        check_pattern_safety(source, self.options.max_pattern_length)?;
        let tester = Arc::new(PatternTester::compile(name, source)?);
        self.constraint_cache.insert(source.into(), tester.clone());
        Ok(tester)
    }

    /// Read-only walk reporting every conflict `commit` would run into.
    fn probe(&self, method: HttpMethod, path: &str, segments: &[PreparedSegment]) -> RadixResult<()> {
        if self.entries.len() >= MAX_ROUTES as usize {
            return Err(RadixError::MaxRoutesExceeded { limit: MAX_ROUTES });
        }

        let mut node = NodeId::ROOT;
        let mut i = 0usize;

        while i < segments.len() {
            match &segments[i] {
                PreparedSegment::Literal(lit) => {
                    let Some(child) = self.arena[node].static_children.get(lit) else {
                        return Ok(());
                    };
                    let matched = shared_parts(&self.arena[child], &segments[i..]);
                    if matched < self.arena[child].segment_parts.len() {
                        // diverges inside a collapsed chain; everything below is new
                        return Ok(());
                    }
                    node = child;
                    i += matched;
                }
                PreparedSegment::Param { name, .. } => {
                    let wanted = segments[i].constraint_source();
                    let Some(child) = self.find_param_child(node, wanted) else {
                        return Ok(());
                    };
                    let existing = self.arena[child].param_name();
                    if existing != name.as_ref() {
                        return Err(RadixError::ParamNameConflict {
                            existing: existing.to_string(),
                            requested: name.to_string(),
                            path: path.to_string(),
                        });
                    }
                    node = child;
                    i += 1;
                }
                PreparedSegment::Wildcard { name, origin } => {
                    let Some(child) = self.arena[node].wildcard_child else {
                        return Ok(());
                    };
                    let existing = &self.arena[child];
                    let same_origin =
                        matches!(existing.kind, super::NodeKind::Wildcard(o) if o == *origin);
                    if existing.param_name() != name.as_ref() || !same_origin {
                        return Err(RadixError::WildcardConflict {
                            existing: existing.param_name().to_string(),
                            requested: name.to_string(),
                            path: path.to_string(),
                        });
                    }
                    node = child;
                    i += 1;
                }
            }
        }

        if let Some(existing_key) = self.arena[node].route(method) {
            return Err(RadixError::DuplicateRoute {
                method,
                path: path.to_string(),
                existing_key,
            });
        }

        Ok(())
    }

    fn commit(&mut self, method: HttpMethod, path: &str, segments: Vec<PreparedSegment>) -> RouteKey {
        let mut node = NodeId::ROOT;
        let mut i = 0usize;

        while i < segments.len() {
            match &segments[i] {
                PreparedSegment::Literal(lit) => match self.arena[node].static_children.get(lit) {
                    Some(child) => {
                        let matched = shared_parts(&self.arena[child], &segments[i..]);
                        if matched < self.arena[child].segment_parts.len() {
                            self.split_node(child, matched);
                        }
                        node = child;
                        i += matched;
                    }
                    None => {
                        let run: SmallVec<[Box<str>; 2]> = segments[i..]
                            .iter()
                            .map_while(PreparedSegment::literal)
                            .map(Box::from)
                            .collect();
                        let consumed = run.len();
                        let child = self.arena.alloc(RadixTreeNode::new_static(run));
                        self.arena[node].static_children.set(lit, child);
                        node = child;
                        i += consumed;
                    }
                },
                PreparedSegment::Param {
                    name,
                    tester,
                    constrained,
                } => {
                    let wanted = segments[i].constraint_source();
                    node = match self.find_param_child(node, wanted) {
                        Some(child) => child,
                        None => {
                            let child = self.arena.alloc(RadixTreeNode::new_param(
                                name.clone(),
                                tester.clone(),
                                *constrained,
                            ));
                            self.arena[node].param_children.push(child);
                            self.sort_param_children(node);
                            child
                        }
                    };
                    i += 1;
                }
                PreparedSegment::Wildcard { name, origin } => {
                    node = match self.arena[node].wildcard_child {
                        Some(child) => child,
                        None => {
                            let child = self
                                .arena
                                .alloc(RadixTreeNode::new_wildcard(name.clone(), *origin));
                            self.arena[node].wildcard_child = Some(child);
                            child
                        }
                    };
                    i += 1;
                }
            }
        }

        let key = self.entries.len() as RouteKey;
        self.arena[node].routes[method.index()] = Some(key);

        let param_names = segments
            .iter()
            .filter_map(|seg| match seg {
                PreparedSegment::Param { name, .. } | PreparedSegment::Wildcard { name, .. } => {
                    Some(name.clone())
                }
                PreparedSegment::Literal(_) => None,
            })
            .collect();
        self.entries.push(RouteEntry {
            key,
            method,
            path: path.into(),
            param_names,
        });

        key
    }

    /// Cuts the collapsed chain of `id` after `at` parts. The tail moves to a
    /// new node, together with everything hanging off the original, and
    /// becomes the only static child of the truncated node.
    fn split_node(&mut self, id: NodeId, at: usize) {
        let original = &mut self.arena[id];
        let tail: SmallVec<[Box<str>; 2]> = original.segment_parts.drain(at..).collect();
        let tail_key = tail[0].clone();

        let mut suffix = RadixTreeNode::new_static(tail);
        suffix.static_children = std::mem::take(&mut original.static_children);
        suffix.param_children = std::mem::take(&mut original.param_children);
        suffix.wildcard_child = original.wildcard_child.take();
        suffix.routes = std::mem::take(&mut original.routes);

        tracing::event!(
            tracing::Level::TRACE,
            operation = "split",
            node = id.index() as u64,
            at = at as u64,
            tail = %tail_key
        );

        let suffix_id = self.arena.alloc(suffix);
        self.arena[id].static_children.set(&tail_key, suffix_id);
    }

    fn find_param_child(&self, node: NodeId, constraint: Option<&str>) -> Option<NodeId> {
        self.arena[node]
            .param_children
            .iter()
            .copied()
            .find(|&child| self.arena[child].constraint_source() == constraint)
    }

    fn sort_param_children(&mut self, node: NodeId) {
        let mut children = std::mem::take(&mut self.arena[node].param_children);
        children.sort_by(|&a, &b| {
            let (a, b) = (&self.arena[a], &self.arena[b]);
            compare_param_priority(
                a.param_name(),
                a.constraint_source(),
                b.param_name(),
                b.constraint_source(),
            )
        });
        self.arena[node].param_children = children;
    }
}

fn check_duplicate_names(path: &str, parsed: &[SegmentPattern]) -> RadixResult<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(parsed.len());
    for name in parsed.iter().filter_map(SegmentPattern::param_name) {
        if !seen.insert(name) {
            return Err(RadixError::DuplicateParamName {
                param: name.to_string(),
                path: path.to_string(),
            });
        }
    }
    Ok(())
}

/// How many of `node`'s parts the leading literal segments reproduce.
fn shared_parts(node: &RadixTreeNode, segments: &[PreparedSegment]) -> usize {
    node.segment_parts
        .iter()
        .zip(segments.iter())
        .take_while(|(part, seg)| seg.literal() == Some(part.as_ref()))
        .count()
}

fn check_literal(path: &str, literal: &str) -> RadixResult<()> {
    if let Some(&byte) = literal.as_bytes().iter().find(|&&b| !is_allowed_literal_byte(b)) {
        return Err(PathError::DisallowedCharacter {
            input: path.to_string(),
            character: byte as char,
            byte,
        }
        .into());
    }
    if literal == ".." {
        return Err(PathError::InvalidParentTraversal {
            input: path.to_string(),
        }
        .into());
    }
    Ok(())
}
