mod alloc;
mod builder;
mod error;
mod insert;
mod mask;
pub mod node;
pub mod static_index;
mod traversal;
mod tree;

pub(crate) use alloc::NodeArena;
pub use alloc::NodeId;
pub use builder::{TreeSummary, summarize};
pub use error::{RadixError, RadixResult};
pub use node::{MethodMask, NodeFlags, NodeKind, RadixTreeNode};
pub use static_index::{STATIC_PROMOTION_THRESHOLD, StaticChildIndex, fingerprint};
pub use tree::{HTTP_METHOD_COUNT, MAX_ROUTES, RadixTree};
