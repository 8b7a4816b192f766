pub mod lru;

pub use lru::{BoundedLru, EvictHook};

#[cfg(feature = "concurrency")]
pub use lru::ConcurrentBoundedLru;
