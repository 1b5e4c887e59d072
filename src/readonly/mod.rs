pub mod cache;
pub mod cache_index;
pub mod snapshot;

pub use cache::{CacheStats, CachedRoute, DEFAULT_CACHE_CAPACITY, RouteCache};
pub use cache_index::CacheIndex;
pub use snapshot::RouterReadOnly;
