//! Unified cache builder and plain-value front door.
//!
//! Provides a simple API to create caches while hiding the internal
//! `Arc<V>` wrapping and the boxed hook type.
//!
//! ## Example
//!
//! ```rust
//! use evictkit::builder::CacheBuilder;
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>();
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::policy::lru::{BoundedLru, EvictHook};
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache, RecencyCache};

/// Cache wrapper that hides the internal `Arc<V>` representation.
///
/// Values go in and come out as plain `V`; ownership transfer out of the
/// cache clones only when another handle to the value is still alive.
pub struct Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    inner: BoundedLru<K, V>,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner
            .insert(key, Arc::new(value))
            .map(|arc| Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone()))
    }

    /// Get a reference to a value by key, promoting it to most recently used.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.inner.get(key).map(|arc| arc.as_ref())
    }

    /// Look up a value without promoting it.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.peek(key).map(|arc| (*arc).clone())
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.inner
            .remove(key)
            .map(|arc| Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone()))
    }

    /// Remove every entry the predicate matches; returns the removed count.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        self.inner.remove_where(|key, value| predicate(key, value.as_ref()))
    }

    /// Remove and return the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        self.inner.pop_lru().map(|(key, arc)| {
            let value = Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone());
            (key, value)
        })
    }

    /// Observe the next eviction candidate without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.inner.peek_lru().map(|(key, arc)| (key, arc.as_ref()))
    }

    /// Promote an entry without retrieving its value.
    pub fn touch(&mut self, key: &K) -> bool {
        self.inner.touch(key)
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    /// Clear all entries.
    pub fn clear(&mut self) {
        self.inner.clear()
    }
}

/// Builder for creating cache instances.
pub struct CacheBuilder {
    capacity: usize,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Attach an eviction hook, fixing the key and value types.
    ///
    /// The hook fires once per capacity-overflow eviction with the evicted
    /// key and a shared handle to the evicted value.
    pub fn on_evict<K, V, F>(self, hook: F) -> HookedCacheBuilder<K, V>
    where
        K: Eq + Hash + Clone,
        F: FnMut(K, Arc<V>) + Send + 'static,
    {
        HookedCacheBuilder {
            capacity: self.capacity,
            hook: Box::new(hook),
        }
    }

    /// Build a cache without an eviction hook.
    ///
    /// # Type Parameters
    ///
    /// - `K`: Key type, must be `Eq + Hash + Clone`
    /// - `V`: Value type, must be `Clone`
    ///
    /// # Example
    ///
    /// ```rust
    /// use evictkit::builder::CacheBuilder;
    ///
    /// let mut cache = CacheBuilder::new(100).build::<String, Vec<u8>>();
    /// cache.insert("blob".to_string(), vec![1, 2, 3]);
    /// assert_eq!(cache.len(), 1);
    /// ```
    pub fn build<K, V>(self) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        Cache {
            inner: BoundedLru::new(self.capacity),
        }
    }

    /// Build, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is 0.
    pub fn try_build<K, V>(self) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
        V: Clone,
    {
        Ok(Cache {
            inner: BoundedLru::try_new(self.capacity)?,
        })
    }
}

/// Builder state carrying an eviction hook.
///
/// Produced by [`CacheBuilder::on_evict`]; the hook pins down `K` and `V`.
pub struct HookedCacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
{
    capacity: usize,
    hook: EvictHook<K, V>,
}

impl<K, V> HookedCacheBuilder<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Build a cache that invokes the hook on every overflow eviction.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use evictkit::builder::CacheBuilder;
    ///
    /// let mut cache = CacheBuilder::new(1)
    ///     .on_evict(|key: String, _value: Arc<u32>| println!("evicted {key}"))
    ///     .build();
    /// cache.insert("a".to_string(), 1);
    /// cache.insert("b".to_string(), 2); // prints "evicted a"
    /// ```
    pub fn build(self) -> Cache<K, V> {
        let mut inner = BoundedLru::new(self.capacity);
        inner.set_hook(self.hook);
        Cache { inner }
    }

    /// Build, rejecting a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is 0.
    pub fn try_build(self) -> Result<Cache<K, V>, ConfigError> {
        let mut inner = BoundedLru::try_new(self.capacity)?;
        inner.set_hook(self.hook);
        Ok(Cache { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_ops() {
        let mut cache = CacheBuilder::new(10).build::<u64, String>();

        // Insert
        assert_eq!(cache.insert(1, "one".to_string()), None);
        assert_eq!(cache.insert(2, "two".to_string()), None);

        // Get
        assert_eq!(cache.get(&1), Some(&"one".to_string()));
        assert_eq!(cache.get(&2), Some(&"two".to_string()));
        assert_eq!(cache.get(&3), None);

        // Contains
        assert!(cache.contains(&1));
        assert!(!cache.contains(&99));

        // Len
        assert_eq!(cache.len(), 2);

        // Update returns previous
        assert_eq!(cache.insert(1, "uno".to_string()), Some("one".to_string()));

        // Remove
        assert_eq!(cache.remove(&1), Some("uno".to_string()));
        assert_eq!(cache.remove(&1), None);

        // Clear
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_eviction_order_through_wrapper() {
        let mut cache = CacheBuilder::new(2).build::<String, u32>();
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        cache.get(&"a".to_string());
        cache.insert("c".to_string(), 3);

        assert!(cache.contains(&"a".to_string()));
        assert!(!cache.contains(&"b".to_string()));
        assert_eq!(cache.pop_lru(), Some(("a".to_string(), 1)));
    }

    #[test]
    fn test_remove_where_through_wrapper() {
        let mut cache = CacheBuilder::new(10).build::<String, u32>();
        for i in 0..6u32 {
            cache.insert(i.to_string(), i);
        }

        let removed = cache.remove_where(|_, value| value % 2 == 0);
        assert_eq!(removed, 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_hooked_builder_fires_hook() {
        use std::sync::{Arc, Mutex};

        let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let mut cache = CacheBuilder::new(1)
            .on_evict(move |key: String, _value: Arc<u32>| {
                sink.lock().unwrap().push(key);
            })
            .try_build()
            .unwrap();

        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        assert_eq!(log.lock().unwrap().as_slice(), &["a".to_string()]);
    }

    #[test]
    fn test_try_build_rejects_zero_capacity() {
        assert!(CacheBuilder::new(0).try_build::<u64, String>().is_err());
        assert!(CacheBuilder::new(0)
            .on_evict(|_k: u64, _v: std::sync::Arc<String>| {})
            .try_build()
            .is_err());
    }

    #[test]
    fn test_peek_and_peek_lru() {
        let mut cache = CacheBuilder::new(3).build::<String, u32>();
        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);

        assert_eq!(cache.peek(&"a".to_string()), Some(1));
        assert_eq!(cache.peek_lru().map(|(k, v)| (k.clone(), *v)), Some(("a".to_string(), 1)));
    }
}
