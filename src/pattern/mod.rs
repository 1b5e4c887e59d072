mod error;
mod guard;
mod lexer;
mod scoring;
mod segment;
mod tester;

pub use error::{PatternError, PatternResult};
pub use guard::{DEFAULT_MAX_PATTERN_LENGTH, check_pattern_safety};
pub use lexer::{parse_segment, split_pattern_segments};
pub use scoring::compare_param_priority;
pub use segment::{SegmentPattern, WildcardOrigin};
pub use tester::{
    DEFAULT_PARAM_PATTERN, PatternTester, PatternTimeout, TimeoutGuard, TimeoutObserver,
    TimeoutPolicy,
};
