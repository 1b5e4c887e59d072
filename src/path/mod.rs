mod error;
mod normalize;

pub use error::{PathError, PathResult};
pub use normalize::{Segments, split_segments, validate_match_path};
pub(crate) use normalize::{is_allowed_literal_byte, validate_envelope};
