pub use crate::builder::{Cache, CacheBuilder, HookedCacheBuilder};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::policy::lru::ConcurrentBoundedLru;
pub use crate::policy::lru::{BoundedLru, EvictHook};
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentCache;
pub use crate::traits::{CoreCache, MutableCache, ReadOnlyCache, RecencyCache};
