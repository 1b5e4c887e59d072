pub mod enums;
pub mod errors;
pub mod matcher;
pub mod path;
pub mod pattern;
pub mod radix;
pub mod readonly;
pub mod registry;
pub mod router;
pub mod types;

pub use enums::HttpMethod;
pub use errors::{ErrorKind, RouterError, RouterResult};
pub use matcher::Params;
pub use pattern::{PatternTimeout, TimeoutObserver, TimeoutPolicy};
pub use readonly::{CacheIndex, RouterReadOnly};
pub use router::{Router, RouterOptions, RouterOptionsBuilder, RouterOptionsError};
pub use types::{RouteEntry, RouteKey, RouteMatch, RouteSpec};
