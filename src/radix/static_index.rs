use smallvec::SmallVec;
use std::cmp::Ordering;

use super::NodeId;

/// Child count above which a node's literal children move to the sorted form.
pub const STATIC_PROMOTION_THRESHOLD: usize = 8;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the segment bytes. Only used to speed up comparisons;
/// equal fingerprints always fall back to the full byte comparison.
#[inline]
pub fn fingerprint(segment: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in segment {
        hash ^= b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[derive(Debug, Clone)]
struct SortedEntry {
    fingerprint: u32,
    segment: Box<str>,
    node: NodeId,
}

impl SortedEntry {
    #[inline(always)]
    fn cmp_key(&self, fingerprint: u32, segment: &[u8]) -> Ordering {
        self.fingerprint
            .cmp(&fingerprint)
            .then_with(|| self.segment.as_bytes().cmp(segment))
    }
}

#[derive(Debug, Clone)]
enum Repr {
    Inline {
        keys: SmallVec<[Box<str>; STATIC_PROMOTION_THRESHOLD]>,
        vals: SmallVec<[NodeId; STATIC_PROMOTION_THRESHOLD]>,
    },
    Sorted(Vec<SortedEntry>),
}

/// Literal segment -> child node map of a single trie node.
///
/// Parallel arrays scanned linearly while small; once more than
/// `STATIC_PROMOTION_THRESHOLD` children exist it promotes, once and for good,
/// to an array sorted by `(fingerprint, segment)` searched by bisection.
#[derive(Debug, Clone)]
pub struct StaticChildIndex {
    repr: Repr,
}

impl Default for StaticChildIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticChildIndex {
    pub fn new() -> Self {
        Self {
            repr: Repr::Inline {
                keys: SmallVec::new(),
                vals: SmallVec::new(),
            },
        }
    }

    #[inline]
    pub fn get(&self, segment: &str) -> Option<NodeId> {
        self.get_bytes(segment.as_bytes())
    }

    /// Lookup on raw bytes; the matcher's hot path.
    #[inline]
    pub fn get_bytes(&self, segment: &[u8]) -> Option<NodeId> {
        match &self.repr {
            Repr::Inline { keys, vals } => {
                let first = segment.first().copied();
                for (i, key) in keys.iter().enumerate() {
                    let kb = key.as_bytes();
                    if kb.len() == segment.len() && kb.first().copied() == first && kb == segment {
                        return Some(vals[i]);
                    }
                }
                None
            }
            Repr::Sorted(entries) => {
                let fp = fingerprint(segment);
                entries
                    .binary_search_by(|e| e.cmp_key(fp, segment))
                    .ok()
                    .map(|pos| entries[pos].node)
            }
        }
    }

    /// Inserts or replaces. Returns the previous child for `segment`.
    pub fn set(&mut self, segment: &str, node: NodeId) -> Option<NodeId> {
        match &mut self.repr {
            Repr::Inline { keys, vals } => {
                if let Some(pos) = keys.iter().position(|k| k.as_ref() == segment) {
                    return Some(std::mem::replace(&mut vals[pos], node));
                }
                if keys.len() < STATIC_PROMOTION_THRESHOLD {
                    keys.push(segment.into());
                    vals.push(node);
                    return None;
                }
                self.promote();
                self.set(segment, node)
            }
            Repr::Sorted(entries) => {
                let fp = fingerprint(segment.as_bytes());
                match entries.binary_search_by(|e| e.cmp_key(fp, segment.as_bytes())) {
                    Ok(pos) => Some(std::mem::replace(&mut entries[pos].node, node)),
                    Err(pos) => {
                        entries.insert(
                            pos,
                            SortedEntry {
                                fingerprint: fp,
                                segment: segment.into(),
                                node,
                            },
                        );
                        None
                    }
                }
            }
        }
    }

    fn promote(&mut self) {
        let Repr::Inline { keys, vals } = &mut self.repr else {
            return;
        };

        let mut entries: Vec<SortedEntry> = keys
            .drain(..)
            .zip(vals.drain(..))
            .map(|(segment, node)| SortedEntry {
                fingerprint: fingerprint(segment.as_bytes()),
                segment,
                node,
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.cmp_key(b.fingerprint, b.segment.as_bytes()));

        tracing::event!(
            tracing::Level::TRACE,
            operation = "static_index_promote",
            children = entries.len() as u64
        );

        self.repr = Repr::Sorted(entries);
    }

    #[inline]
    pub fn len(&self) -> usize {
        match &self.repr {
            Repr::Inline { keys, .. } => keys.len(),
            Repr::Sorted(entries) => entries.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn is_promoted(&self) -> bool {
        matches!(self.repr, Repr::Sorted(_))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        let (inline, sorted) = match &self.repr {
            Repr::Inline { keys, vals } => (Some(keys.iter().zip(vals.iter())), None),
            Repr::Sorted(entries) => (None, Some(entries.iter())),
        };
        inline
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_ref(), *v))
            .chain(
                sorted
                    .into_iter()
                    .flatten()
                    .map(|e| (e.segment.as_ref(), e.node)),
            )
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        match &mut self.repr {
            Repr::Inline { keys, vals } => {
                keys.shrink_to_fit();
                vals.shrink_to_fit();
            }
            Repr::Sorted(entries) => entries.shrink_to_fit(),
        }
    }
}
