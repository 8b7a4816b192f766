//! # Cache Trait Hierarchy
//!
//! This module defines the trait hierarchy for the cache primitives in this
//! crate, separating read-only inspection, core mutation, arbitrary removal,
//! and recency-ordered eviction into small composable layers.
//!
//! ## Architecture
//!
//! ```text
//!                ┌──────────────────────────────────────────┐
//!                │          ReadOnlyCache<K, V>             │
//!                │                                          │
//!                │  contains(&, &K) → bool                  │
//!                │  len(&) → usize                          │
//!                │  is_empty(&) → bool                      │
//!                │  capacity(&) → usize                     │
//!                └────────────────────┬─────────────────────┘
//!                                     │
//!                                     ▼
//!                ┌──────────────────────────────────────────┐
//!                │           CoreCache<K, V>                │
//!                │                                          │
//!                │  insert(&mut, K, V) → Option<V>          │
//!                │  get(&mut, &K) → Option<&V>              │
//!                │  clear(&mut)                             │
//!                └────────────────────┬─────────────────────┘
//!                                     │
//!                                     ▼
//!                ┌──────────────────────────────────────────┐
//!                │          MutableCache<K, V>              │
//!                │                                          │
//!                │  remove(&K) → Option<V>                  │
//!                │  remove_batch(&[K]) → Vec<Option<V>>     │
//!                │  remove_where(pred) → usize              │
//!                └────────────────────┬─────────────────────┘
//!                                     │
//!                                     ▼
//!                ┌──────────────────────────────────────────┐
//!                │          RecencyCache<K, V>              │
//!                │                                          │
//!                │  pop_lru() → Option<(K, V)>              │
//!                │  peek_lru() → Option<(&K, &V)>           │
//!                │  touch(&K) → bool                        │
//!                │  recency_rank(&K) → Option<usize>        │
//!                └──────────────────────────────────────────┘
//! ```
//!
//! ## Trait Design
//!
//! | Trait             | Extends          | Purpose                            |
//! |-------------------|------------------|------------------------------------|
//! | `ReadOnlyCache`   | -                | Inspection without mutation        |
//! | `CoreCache`       | `ReadOnlyCache`  | Insert / lookup / clear            |
//! | `MutableCache`    | `CoreCache`      | Arbitrary and bulk removal         |
//! | `RecencyCache`    | `MutableCache`   | Recency-ordered drain and touch    |
//! | `ConcurrentCache` | `Send + Sync`    | Marker for thread-safe wrappers    |
//!
//! The split keeps caller bounds honest: code that only drains a cache in
//! eviction order takes `RecencyCache`, code that only invalidates keys takes
//! `MutableCache`, and read paths take `ReadOnlyCache`.
//!
//! ## Eviction Hook Contract
//!
//! Implementations that carry an eviction hook (see
//! [`BoundedLru`](crate::policy::lru::BoundedLru)) invoke it only for
//! capacity-overflow evictions inside [`CoreCache::insert`]. Removal
//! operations on these traits (`remove`, `remove_batch`, `remove_where`,
//! `pop_lru`, `clear`) are caller-initiated and never fire the hook.

/// Read-only cache inspection.
///
/// Operations that observe the cache without mutating entries or their
/// eviction order. Every cache type in this crate implements this trait.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use evictkit::traits::{CoreCache, ReadOnlyCache};
/// use evictkit::policy::lru::BoundedLru;
///
/// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(100);
/// cache.insert(1, Arc::new("one"));
///
/// assert!(cache.contains(&1));
/// assert_eq!(cache.len(), 1);
/// assert_eq!(cache.capacity(), 100);
/// ```
pub trait ReadOnlyCache<K, V> {
    /// Checks if a key exists without updating access state.
    ///
    /// Unlike [`CoreCache::get`], this does not affect eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("value"));
    ///
    /// assert!(cache.contains(&1));
    /// assert!(!cache.contains(&99));
    /// ```
    fn contains(&self, key: &K) -> bool;

    /// Returns the current number of entries in the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// assert_eq!(cache.len(), 0);
    ///
    /// cache.insert(1, Arc::new("one"));
    /// cache.insert(2, Arc::new("two"));
    /// assert_eq!(cache.len(), 2);
    /// ```
    fn len(&self) -> usize;

    /// Returns `true` if the cache contains no entries.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// assert!(cache.is_empty());
    ///
    /// cache.insert(1, Arc::new("value"));
    /// assert!(!cache.is_empty());
    /// ```
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the maximum capacity of the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::traits::ReadOnlyCache;
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let cache: BoundedLru<u64, &str> = BoundedLru::new(100);
    /// assert_eq!(cache.capacity(), 100);
    /// ```
    fn capacity(&self) -> usize;
}

/// Core cache operations that every cache supports.
///
/// Insert, lookup, and clear. Lookup may update internal recency state
/// depending on the policy; use [`ReadOnlyCache::contains`] when existence is
/// all that matters.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use evictkit::traits::{CoreCache, ReadOnlyCache};
/// use evictkit::policy::lru::BoundedLru;
///
/// fn warm_cache<C: CoreCache<u64, Arc<String>>>(cache: &mut C, data: &[(u64, String)]) {
///     for (key, value) in data {
///         cache.insert(*key, Arc::new(value.clone()));
///     }
/// }
///
/// let mut cache = BoundedLru::new(100);
/// warm_cache(&mut cache, &[(1, "one".to_string()), (2, "two".to_string())]);
/// assert_eq!(cache.len(), 2);
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Inserts a key-value pair, returning the previous value if it existed.
    ///
    /// If the key is new and the cache is at capacity, the entry at the far
    /// end of the eviction order is removed first according to the cache's
    /// policy.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    ///
    /// // New key returns None
    /// assert!(cache.insert(1, Arc::new("first")).is_none());
    ///
    /// // Existing key returns previous value
    /// let previous = cache.insert(1, Arc::new("second"));
    /// assert_eq!(previous.map(|v| *v), Some("first"));
    /// ```
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Gets a reference to a value by key.
    ///
    /// Updates recency state: the entry becomes the most recently used.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::CoreCache;
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("value"));
    ///
    /// assert_eq!(cache.get(&1).map(|v| **v), Some("value"));
    /// assert!(cache.get(&99).is_none());
    /// ```
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Removes all entries from the cache.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("one"));
    /// cache.insert(2, Arc::new("two"));
    /// assert_eq!(cache.len(), 2);
    ///
    /// cache.clear();
    /// assert!(cache.is_empty());
    /// ```
    fn clear(&mut self);
}

/// Caches that support arbitrary key-based removal.
///
/// This trait extends [`CoreCache`] with removal by key, batch removal, and
/// predicate-driven bulk cleanup. Appropriate for recency- and
/// frequency-ordered caches where arbitrary removal doesn't violate policy
/// semantics.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use evictkit::traits::{CoreCache, MutableCache, ReadOnlyCache};
/// use evictkit::policy::lru::BoundedLru;
///
/// fn invalidate_keys<C: MutableCache<u64, Arc<String>>>(cache: &mut C, keys: &[u64]) {
///     for key in keys {
///         cache.remove(key);
///     }
/// }
///
/// let mut cache = BoundedLru::new(100);
/// cache.insert(1, Arc::new("one".to_string()));
/// cache.insert(2, Arc::new("two".to_string()));
/// cache.insert(3, Arc::new("three".to_string()));
///
/// invalidate_keys(&mut cache, &[1, 3]);
/// assert!(!cache.contains(&1));
/// assert!(cache.contains(&2));
/// assert!(!cache.contains(&3));
/// ```
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes a specific key-value pair.
    ///
    /// Returns the removed value if the key existed, or `None` if it didn't.
    /// Removing a missing key is a silent no-op.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, MutableCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("value"));
    ///
    /// assert_eq!(cache.remove(&1).map(|v| *v), Some("value"));
    /// assert!(cache.remove(&1).is_none());  // Already removed
    /// ```
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Removes multiple keys efficiently.
    ///
    /// Returns a vector of `Option<V>` in the same order as the input keys.
    /// The default implementation loops over [`remove`](Self::remove).
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, MutableCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("one"));
    /// cache.insert(2, Arc::new("two"));
    /// cache.insert(3, Arc::new("three"));
    ///
    /// let removed = cache.remove_batch(&[1, 99, 3]);
    /// assert_eq!(removed.len(), 3);
    /// assert!(removed[0].is_some());
    /// assert!(removed[1].is_none());
    /// assert!(removed[2].is_some());
    /// assert_eq!(cache.len(), 1);
    /// ```
    fn remove_batch(&mut self, keys: &[K]) -> Vec<Option<V>> {
        keys.iter().map(|k| self.remove(k)).collect()
    }

    /// Removes every entry for which the predicate returns `true`.
    ///
    /// The predicate is evaluated exactly once per entry that was present
    /// when the call started; removals performed during the traversal neither
    /// skip nor revisit entries. Returns the number of entries removed.
    ///
    /// This is the bulk-invalidation primitive: O(n) in the number of
    /// entries, since every entry must be consulted.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, MutableCache, ReadOnlyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("one"));
    /// cache.insert(2, Arc::new("two"));
    /// cache.insert(3, Arc::new("three"));
    ///
    /// let removed = cache.remove_where(|key, _value| key % 2 == 1);
    /// assert_eq!(removed, 2);
    /// assert_eq!(cache.len(), 1);
    /// assert!(cache.contains(&2));
    /// ```
    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool;
}

/// Recency-ordered operations for LRU-style caches.
///
/// This trait extends [`MutableCache`] with eviction-order access: draining
/// entries strictly least-recently-used first, observing the next eviction
/// candidate, and refreshing recency without retrieving data.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use evictkit::traits::{CoreCache, RecencyCache};
/// use evictkit::policy::lru::BoundedLru;
///
/// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(3);
/// cache.insert(1, Arc::new("first"));
/// cache.insert(2, Arc::new("second"));
/// cache.insert(3, Arc::new("third"));
///
/// // Access key 1 to make it MRU
/// cache.get(&1);
///
/// // Key 2 is now LRU
/// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
///
/// // Touch without retrieving value
/// assert!(cache.touch(&2));  // Now key 3 is LRU
///
/// // Pop LRU entry
/// let (key, _) = cache.pop_lru().unwrap();
/// assert_eq!(key, 3);
/// ```
pub trait RecencyCache<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    ///
    /// Returns `None` if the cache is empty, repeatably. Draining a cache
    /// with `pop_lru` yields entries in strict eviction order.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, RecencyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("first"));
    /// cache.insert(2, Arc::new("second"));
    ///
    /// let (key, _) = cache.pop_lru().unwrap();
    /// assert_eq!(key, 1);  // First inserted, not accessed since
    ///
    /// cache.pop_lru();
    /// assert!(cache.pop_lru().is_none());  // Empty now
    /// ```
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Peeks at the LRU entry without removing it.
    ///
    /// Returns `None` if the cache is empty. Does not update recency.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, RecencyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("first"));
    /// cache.insert(2, Arc::new("second"));
    ///
    /// // Peek doesn't affect order
    /// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
    /// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
    /// ```
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks an entry as recently used without retrieving the value.
    ///
    /// Returns `true` if the key was found and touched, `false` otherwise.
    /// Useful for refreshing eviction order without fetching data.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, RecencyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("first"));
    /// cache.insert(2, Arc::new("second"));
    ///
    /// // Key 1 is LRU
    /// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(1));
    ///
    /// // Touch key 1 to make it MRU
    /// assert!(cache.touch(&1));
    ///
    /// // Now key 2 is LRU
    /// assert_eq!(cache.peek_lru().map(|(k, _)| *k), Some(2));
    ///
    /// // Touch non-existent key returns false
    /// assert!(!cache.touch(&99));
    /// ```
    fn touch(&mut self, key: &K) -> bool;

    /// Gets the recency rank of a key (0 = most recent, higher = less recent).
    ///
    /// Returns `None` if the key is not found. O(n) scan of the recency
    /// order; intended for diagnostics and tests, not hot paths.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::traits::{CoreCache, RecencyCache};
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let mut cache: BoundedLru<u64, &str> = BoundedLru::new(10);
    /// cache.insert(1, Arc::new("first"));
    /// cache.insert(2, Arc::new("second"));
    /// cache.insert(3, Arc::new("third"));
    ///
    /// // Most recent insertion is rank 0
    /// assert_eq!(cache.recency_rank(&3), Some(0));
    /// assert_eq!(cache.recency_rank(&2), Some(1));
    /// assert_eq!(cache.recency_rank(&1), Some(2));  // Oldest
    /// assert_eq!(cache.recency_rank(&99), None);
    /// ```
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Marker trait for thread-safe cache wrappers.
///
/// Implemented by wrappers that provide their own internal synchronization
/// (e.g. [`ConcurrentBoundedLru`](crate::policy::lru::ConcurrentBoundedLru)).
/// Core policy types are single-threaded and do not implement this.
#[cfg(feature = "concurrency")]
pub trait ConcurrentCache: Send + Sync {}
