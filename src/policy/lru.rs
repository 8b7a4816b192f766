//! # Bounded LRU Cache with Eviction Hooks
//!
//! This module provides the bounded, recency-ordered cache that backs the
//! dispatch layer: a hash index over a doubly-linked recency list, with an
//! optional hook that observes capacity-overflow evictions.
//!
//! ## Architecture
//!
//! ```text
//!   ┌────────────────────────────────────────────────────────────────────┐
//!   │                         BoundedLru<K, V>                           │
//!   │                                                                    │
//!   │   ┌──────────────────────────────────────────────────────────┐    │
//!   │   │  FxHashMap<K, NonNull<Node>> (index into the list)       │    │
//!   │   │                                                          │    │
//!   │   │  ┌──────────┬──────────────────────────────────────┐     │    │
//!   │   │  │   Key    │  Node pointer                        │     │    │
//!   │   │  ├──────────┼──────────────────────────────────────┤     │    │
//!   │   │  │  "job-1" │  ────────────────────────────────┐   │     │    │
//!   │   │  │  "job-2" │  ──────────────────────────┐     │   │     │    │
//!   │   │  │  "job-3" │  ────────────────────┐     │     │   │     │    │
//!   │   │  └──────────┴──────────────────────┼─────┼─────┼───┘     │    │
//!   │   └─────────────────────────────────── ┼─────┼─────┼─────────┘    │
//!   │                                        ▼     ▼     ▼              │
//!   │   head ──► ┌────────┐ ◄──► ┌────────┐ ◄──► ┌────────┐ ◄── tail    │
//!   │     (MRU)  │  Node  │      │  Node  │      │  Node  │   (LRU)     │
//!   │            │ K,Arc V│      │ K,Arc V│      │ K,Arc V│             │
//!   │            └────────┘      └────────┘      └────────┘             │
//!   │                                                                   │
//!   │   on_evict: Option<EvictHook<K, V>>  (capacity overflow only)     │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! | Component                 | Description                                    |
//! |---------------------------|------------------------------------------------|
//! | `BoundedLru<K, V>`        | Single-threaded core with index + list + hook  |
//! | `ConcurrentBoundedLru`    | Thread-safe wrapper with `parking_lot::RwLock` |
//! | `Node<K, V>`              | Heap node holding key + `Arc<V>` + list links  |
//! | `EvictHook<K, V>`         | `Box<dyn FnMut(K, Arc<V>) + Send>`             |
//!
//! ## Operation Flow
//!
//! ```text
//!   INSERT new key (cache full)
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   Before:
//!     head ──► [A] ◄──► [B] ◄──► [C] ◄── tail    (capacity = 3)
//!              MRU                LRU
//!
//!   insert(D):
//!     1. Pop [C] from tail, erase it from the index
//!     2. Invoke on_evict(C.key, C.value)   (bookkeeping already done)
//!     3. Attach [D] at head
//!
//!   After:
//!     head ──► [D] ◄──► [A] ◄──► [B] ◄── tail
//!
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   GET existing key
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   get(B): find [B] in the index O(1), move [B] to head O(1).
//!   A hit always promotes: reads participate in recency order.
//!
//!   POP_LRU
//!   ═══════════════════════════════════════════════════════════════════
//!
//!   pop_lru(): detach the tail node, erase from index, hand (K, Arc<V>)
//!   to the caller. Draining with pop_lru yields strict LRU order. The
//!   hook does NOT fire: the caller asked for the entry.
//! ```
//!
//! ## Eviction Hook Contract
//!
//! The hook fires exactly once for every entry the cache itself removes due
//! to capacity overflow, and only then:
//!
//! | Operation             | Hook fires?                                  |
//! |-----------------------|----------------------------------------------|
//! | `insert` (overflow)   | yes, once, with the evicted (key, value)     |
//! | `insert` (update)     | no (size did not grow, nothing evicted)      |
//! | `remove` / `remove_batch` | no (caller-initiated)                    |
//! | `remove_where`        | no (caller-initiated)                        |
//! | `pop_lru`             | no (entry is returned to the caller)         |
//! | `clear`               | no (caller-initiated)                        |
//!
//! The hook runs synchronously inside the triggering `insert`, after the
//! cache's bookkeeping for that eviction is complete. It must not call back
//! into the same cache (the borrow rules prevent it for `BoundedLru`; for
//! `ConcurrentBoundedLru` a re-entrant call would deadlock on the write
//! lock) and it should not block for long, since it delays `insert`.
//!
//! ## Performance Characteristics
//!
//! | Operation        | Time       | Notes                                |
//! |------------------|------------|--------------------------------------|
//! | `insert`         | O(1) avg   | Index update + list splice + hook    |
//! | `get` / `touch`  | O(1) avg   | Index lookup + move to head          |
//! | `peek`           | O(1) avg   | Index lookup only, no reorder        |
//! | `remove`         | O(1) avg   | Index remove + unlink                |
//! | `pop_lru`        | O(1)       | Tail removal                         |
//! | `remove_where`   | O(n)       | Predicate on every entry             |
//! | `recency_rank`   | O(n)       | Diagnostic scan                      |
//!
//! ## Thread Safety
//!
//! - `BoundedLru`: **NOT thread-safe**; `&mut self` enforces external
//!   exclusion at compile time. Callers sharing one instance across threads
//!   must wrap it in a lock.
//! - `ConcurrentBoundedLru` (feature `concurrency`): that lock, packaged:
//!   `Arc<parking_lot::RwLock<BoundedLru>>` with write locking for anything
//!   that reorders and read locking for pure observation.
//! - Values are `Arc<V>`, so callers can keep a handle to a value after the
//!   entry is evicted (e.g. while releasing the resource it describes).

use std::fmt;
use std::hash::Hash;
use std::ptr::NonNull;
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder, MetricsSnapshotProvider,
};
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentCache;
use crate::traits::{CoreCache, MutableCache, ReadOnlyCache, RecencyCache};

/// Hook invoked for every entry the cache evicts on capacity overflow.
///
/// Receives ownership of the evicted key and a handle to the evicted value.
/// Caller-initiated removal (`remove`, `remove_where`, `pop_lru`, `clear`)
/// does not invoke the hook.
pub type EvictHook<K, V> = Box<dyn FnMut(K, Arc<V>) + Send>;

/// Node in the recency list.
///
/// Layout keeps the list links first: traversal touches them far more often
/// than the payload.
#[repr(C)]
struct Node<K, V> {
    prev: Option<NonNull<Node<K, V>>>,
    next: Option<NonNull<Node<K, V>>>,
    key: K,
    value: Arc<V>,
}

/// Bounded LRU cache core: hash index + raw-pointer recency list.
///
/// Keys are cheap-to-clone lookup handles (string keys in the dispatch
/// deployment); values are `Arc<V>` so retrieval and eviction share rather
/// than copy. Capacity is fixed at construction.
///
/// A capacity of 0 creates a cache that accepts no items: every insert of a
/// new key is a no-op and the eviction hook never fires, since no entry ever
/// enters the cache. Use [`try_new`](BoundedLru::try_new) to treat capacity
/// 0 as a configuration error instead.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use evictkit::policy::lru::BoundedLru;
/// use evictkit::traits::{CoreCache, RecencyCache};
///
/// let mut cache: BoundedLru<String, &str> = BoundedLru::new(2);
/// cache.insert("a".to_string(), Arc::new("alpha"));
/// cache.insert("b".to_string(), Arc::new("beta"));
/// cache.insert("c".to_string(), Arc::new("gamma")); // evicts "a"
///
/// assert_eq!(cache.pop_lru().map(|(k, _)| k), Some("b".to_string()));
/// ```
pub struct BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    map: FxHashMap<K, NonNull<Node<K, V>>>,
    head: Option<NonNull<Node<K, V>>>,
    tail: Option<NonNull<Node<K, V>>>,
    capacity: usize,
    on_evict: Option<EvictHook<K, V>>,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

// SAFETY: BoundedLru owns its nodes exclusively; the raw pointers only
// reference heap memory owned by the struct, so sending the whole struct
// moves that ownership. Arc<V> crossing threads requires V: Send + Sync.
// The hook type already requires Send.
unsafe impl<K, V> Send for BoundedLru<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Send + Sync,
{
}

// SAFETY: every mutation (including the only paths that reach the hook)
// takes &mut self, and no &self method hands out access to the hook. Shared
// references therefore only permit reads of node payloads behind Arc.
unsafe impl<K, V> Sync for BoundedLru<K, V>
where
    K: Eq + Hash + Clone + Sync,
    V: Send + Sync,
{
}

impl<K, V> BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with the given capacity and no eviction hook.
    ///
    /// # Example
    ///
    /// ```
    /// use evictkit::policy::lru::BoundedLru;
    ///
    /// let cache: BoundedLru<String, Vec<u8>> = BoundedLru::new(100);
    /// ```
    #[inline]
    pub fn new(capacity: usize) -> Self {
        BoundedLru {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            head: None,
            tail: None,
            capacity,
            on_evict: None,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Creates a cache that invokes `hook` for every capacity-overflow
    /// eviction.
    ///
    /// The hook receives ownership of the evicted key and a handle to the
    /// evicted value, exactly once per evicted entry. See the module docs
    /// for the full hook contract.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::policy::lru::BoundedLru;
    /// use evictkit::traits::CoreCache;
    ///
    /// let mut cache = BoundedLru::with_hook(1, |key: String, _value: Arc<u32>| {
    ///     println!("evicted {key}");
    /// });
    /// cache.insert("a".to_string(), Arc::new(1));
    /// cache.insert("b".to_string(), Arc::new(2)); // prints "evicted a"
    /// ```
    pub fn with_hook<F>(capacity: usize, hook: F) -> Self
    where
        F: FnMut(K, Arc<V>) + Send + 'static,
    {
        let mut cache = Self::new(capacity);
        cache.on_evict = Some(Box::new(hook));
        cache
    }

    /// Fallible constructor that rejects a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self::new(capacity))
    }

    /// Fallible variant of [`with_hook`](BoundedLru::with_hook).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is 0.
    pub fn try_with_hook<F>(capacity: usize, hook: F) -> Result<Self, ConfigError>
    where
        F: FnMut(K, Arc<V>) + Send + 'static,
    {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than 0"));
        }
        Ok(Self::with_hook(capacity, hook))
    }

    /// Installs or replaces the eviction hook.
    ///
    /// Entries evicted before this call are unaffected; subsequent overflow
    /// evictions invoke the new hook.
    pub fn set_hook(&mut self, hook: EvictHook<K, V>) {
        self.on_evict = Some(hook);
    }

    /// Detach a node from the recency list without removing it from the map.
    #[inline(always)]
    fn detach(&mut self, node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_ref();
            let prev = node.prev;
            let next = node.next;

            match prev {
                Some(mut p) => p.as_mut().next = next,
                None => self.head = next,
            }

            match next {
                Some(mut n) => n.as_mut().prev = prev,
                None => self.tail = prev,
            }
        }
    }

    /// Attach a node at the head (MRU position).
    #[inline(always)]
    fn attach_front(&mut self, mut node_ptr: NonNull<Node<K, V>>) {
        unsafe {
            let node = node_ptr.as_mut();
            node.prev = None;
            node.next = self.head;

            match self.head {
                Some(mut h) => h.as_mut().prev = Some(node_ptr),
                None => self.tail = Some(node_ptr),
            }

            self.head = Some(node_ptr);
        }
    }

    /// Pop the tail node (LRU) and return it.
    #[inline(always)]
    fn pop_tail(&mut self) -> Option<Box<Node<K, V>>> {
        self.tail.map(|tail_ptr| unsafe {
            let node = Box::from_raw(tail_ptr.as_ptr());

            self.tail = node.prev;
            match self.tail {
                Some(mut t) => t.as_mut().next = None,
                None => self.head = None,
            }

            node
        })
    }

    /// Walks the recency list and cross-checks it against the index.
    ///
    /// Verifies the structural invariants: index size equals list length
    /// (both at most `capacity`), every list node is indexed under its own
    /// key, back-links mirror forward links, and the list is acyclic.
    ///
    /// Intended for tests and debug assertions; O(n).
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "index size {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }

        let mut count = 0usize;
        let mut prev: Option<NonNull<Node<K, V>>> = None;
        let mut current = self.head;
        while let Some(ptr) = current {
            count += 1;
            if count > self.map.len() {
                return Err(InvariantError::new("cycle detected in recency list"));
            }

            let node = unsafe { ptr.as_ref() };
            if node.prev != prev {
                return Err(InvariantError::new("back-link does not mirror forward link"));
            }
            match self.map.get(&node.key) {
                Some(&indexed) if indexed == ptr => {},
                Some(_) => {
                    return Err(InvariantError::new("index entry points at a different node"));
                },
                None => return Err(InvariantError::new("list node missing from index")),
            }

            prev = Some(ptr);
            current = node.next;
        }

        if count != self.map.len() {
            return Err(InvariantError::new(format!(
                "index size {} != list length {}",
                self.map.len(),
                count
            )));
        }
        if self.tail != prev {
            return Err(InvariantError::new("tail does not point at the last node"));
        }

        Ok(())
    }

    /// Validate internal invariants (debug builds only).
    fn validate_invariants(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("BoundedLru invariant violated: {}", err);
        }
    }

    /// Read-only lookup without recency update.
    ///
    /// Returns an `Arc<V>` clone for sharing. Unlike
    /// [`get`](CoreCache::get), this does not move the entry to the MRU
    /// position.
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use evictkit::policy::lru::BoundedLru;
    /// use evictkit::traits::{CoreCache, ReadOnlyCache};
    ///
    /// let mut cache: BoundedLru<u32, String> = BoundedLru::new(3);
    /// cache.insert(1, Arc::new("first".to_string()));
    /// cache.insert(2, Arc::new("second".to_string()));
    ///
    /// // Peek doesn't affect recency order
    /// assert_eq!(cache.peek(&1).as_deref().map(String::as_str), Some("first"));
    ///
    /// // Key 1 is still LRU (evicted first)
    /// cache.insert(3, Arc::new("third".to_string()));
    /// cache.insert(4, Arc::new("fourth".to_string()));
    /// assert!(!cache.contains(&1));
    /// ```
    #[inline]
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        if let Some(&node_ptr) = self.map.get(key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_peek_found();
            let value = unsafe { &(*node_ptr.as_ptr()).value };
            return Some(Arc::clone(value));
        }
        None
    }
}

impl<K, V> ReadOnlyCache<K, Arc<V>> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> CoreCache<K, Arc<V>> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Insert or update; the entry becomes most recently used either way.
    ///
    /// On overflow the LRU entry is evicted first and the hook (if any)
    /// fires exactly once for it, after the eviction bookkeeping is done.
    #[inline]
    fn insert(&mut self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        // Existing key: replace in place, promote, nothing is evicted.
        if let Some(&node_ptr) = self.map.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();

            let previous = unsafe {
                let node = &mut *node_ptr.as_ptr();
                std::mem::replace(&mut node.value, value)
            };

            self.detach(node_ptr);
            self.attach_front(node_ptr);

            self.validate_invariants();

            return Some(previous);
        }

        // For zero capacity, never insert anything.
        if self.capacity == 0 {
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        // Evict if at capacity. Insertion grows the cache by one entry, so
        // exactly one eviction restores the bound.
        if self.map.len() >= self.capacity {
            #[cfg(feature = "metrics")]
            self.metrics.record_evict_call();

            if let Some(evicted) = self.pop_tail() {
                self.map.remove(&evicted.key);
                #[cfg(feature = "metrics")]
                self.metrics.record_evicted_entry();

                // Index and list no longer know the entry; safe to hand it
                // to the hook.
                if let Some(hook) = self.on_evict.as_mut() {
                    #[cfg(feature = "metrics")]
                    self.metrics.record_evict_hook_call();

                    let Node { key, value, .. } = *evicted;
                    hook(key, value);
                }
            }
        }

        let node = Box::new(Node {
            prev: None,
            next: None,
            key: key.clone(),
            value,
        });
        let node_ptr = NonNull::from(Box::leak(node));

        self.map.insert(key, node_ptr);
        self.attach_front(node_ptr);

        self.validate_invariants();

        None
    }

    /// Lookup that promotes the entry to most recently used.
    #[inline]
    fn get(&mut self, key: &K) -> Option<&Arc<V>> {
        let node_ptr = match self.map.get(key) {
            Some(&ptr) => ptr,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_get_miss();
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.detach(node_ptr);
        self.attach_front(node_ptr);

        self.validate_invariants();

        unsafe { Some(&(*node_ptr.as_ptr()).value) }
    }

    fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        // Drop all nodes. Caller-initiated, so the hook stays silent.
        while self.pop_tail().is_some() {}
        self.map.clear();

        self.validate_invariants();
    }
}

impl<K, V> MutableCache<K, Arc<V>> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Remove by key; a missing key is a silent no-op.
    #[inline]
    fn remove(&mut self, key: &K) -> Option<Arc<V>> {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let node_ptr = self.map.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove_found();

        self.detach(node_ptr);
        let node = unsafe { Box::from_raw(node_ptr.as_ptr()) };

        self.validate_invariants();

        Some(node.value)
    }

    /// Remove every entry the predicate matches; returns the removed count.
    ///
    /// Each entry present at call time is visited exactly once. The
    /// successor pointer is captured before a node is unlinked, so removal
    /// mid-walk neither skips nor revisits entries.
    fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&K, &Arc<V>) -> bool,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_where_call();

        let mut removed = 0usize;
        let mut current = self.head;
        while let Some(ptr) = current {
            #[cfg(feature = "metrics")]
            self.metrics.record_remove_where_scan_step();

            let (next, matched) = unsafe {
                let node = ptr.as_ref();
                (node.next, predicate(&node.key, &node.value))
            };

            if matched {
                self.detach(ptr);
                let node = unsafe { Box::from_raw(ptr.as_ptr()) };
                self.map.remove(&node.key);
                removed += 1;

                #[cfg(feature = "metrics")]
                self.metrics.record_remove_where_removed();
            }

            current = next;
        }

        self.validate_invariants();

        removed
    }
}

impl<K, V> RecencyCache<K, Arc<V>> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Remove and return the least recently used entry.
    #[inline]
    fn pop_lru(&mut self) -> Option<(K, Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let node = self.pop_tail()?;
        self.map.remove(&node.key);

        self.validate_invariants();

        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_found();

        Some((node.key, node.value))
    }

    /// Observe the next eviction candidate without removing it.
    #[inline]
    fn peek_lru(&self) -> Option<(&K, &Arc<V>)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_lru_call();

        self.tail.map(|tail_ptr| {
            #[cfg(feature = "metrics")]
            self.metrics.record_peek_lru_found();
            unsafe {
                let node = tail_ptr.as_ref();
                (&node.key, &node.value)
            }
        })
    }

    #[inline]
    fn touch(&mut self, key: &K) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        if let Some(&node_ptr) = self.map.get(key) {
            self.detach(node_ptr);
            self.attach_front(node_ptr);

            self.validate_invariants();

            #[cfg(feature = "metrics")]
            self.metrics.record_touch_found();

            true
        } else {
            false
        }
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        #[cfg(feature = "metrics")]
        self.metrics.record_recency_rank_call();

        let &target_ptr = self.map.get(key)?;
        let mut rank = 0usize;
        let mut current = self.head;

        while let Some(ptr) = current {
            #[cfg(feature = "metrics")]
            self.metrics.record_recency_rank_scan_step();

            if ptr == target_ptr {
                #[cfg(feature = "metrics")]
                self.metrics.record_recency_rank_found();
                return Some(rank);
            }
            rank += 1;
            current = unsafe { ptr.as_ref().next };
        }
        None
    }
}

#[cfg(feature = "metrics")]
impl<K, V> BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Snapshot of the operation counters plus current size and capacity.
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            evict_hook_calls: self.metrics.evict_hook_calls,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            remove_where_calls: self.metrics.remove_where_calls,
            remove_where_removed: self.metrics.remove_where_removed,
            remove_where_scan_steps: self.metrics.remove_where_scan_steps,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            clear_calls: self.metrics.clear_calls,
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// Free all heap-allocated nodes when the cache is dropped.
impl<K, V> Drop for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    fn drop(&mut self) {
        while self.pop_tail().is_some() {}
    }
}

impl<K, V> fmt::Debug for BoundedLru<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedLru")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("has_hook", &self.on_evict.is_some())
            .finish_non_exhaustive()
    }
}

impl<K, V> Default for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache with a default capacity of 16 and no hook.
    fn default() -> Self {
        Self::new(16)
    }
}

impl<K, V> Extend<(K, Arc<V>)> for BoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, Arc<V>)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Thread-safe wrapper around [`BoundedLru`] using `parking_lot::RwLock`.
///
/// Write locking covers every operation that reorders the recency list
/// (including `get`, which promotes on hit); read locking covers pure
/// observation (`peek`, `peek_lru`, `len`, `contains`).
///
/// The eviction hook runs while the write lock is held; it must not call
/// back into the same cache.
#[cfg(feature = "concurrency")]
pub struct ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    inner: Arc<RwLock<BoundedLru<K, V>>>,
}

// Manual impl: a clone shares the inner cache and must not require V: Clone.
#[cfg(feature = "concurrency")]
impl<K, V> Clone for ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a thread-safe cache with the given capacity and no hook.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedLru::new(capacity))),
        }
    }

    /// Creates a thread-safe cache that invokes `hook` on every
    /// capacity-overflow eviction. The hook runs under the write lock.
    pub fn with_hook<F>(capacity: usize, hook: F) -> Self
    where
        F: FnMut(K, Arc<V>) + Send + 'static,
    {
        Self {
            inner: Arc::new(RwLock::new(BoundedLru::with_hook(capacity, hook))),
        }
    }

    /// Fallible constructor that rejects a zero capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is 0.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(BoundedLru::try_new(capacity)?)),
        })
    }

    /// Insert a value, wrapping it in `Arc` internally.
    pub fn insert(&self, key: K, value: V) -> Option<Arc<V>> {
        self.inner.write().insert(key, Arc::new(value))
    }

    /// Insert a pre-wrapped `Arc<V>`.
    pub fn insert_arc(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.inner.write().insert(key, value)
    }

    /// Lookup that promotes the entry; returns a shared handle.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().get(key).map(Arc::clone)
    }

    /// Read-only lookup without promotion.
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        self.inner.read().peek(key)
    }

    /// Remove by key; a missing key is a silent no-op.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.inner.write().remove(key)
    }

    /// Remove every entry the predicate matches; returns the removed count.
    pub fn remove_where<F>(&self, predicate: F) -> usize
    where
        F: FnMut(&K, &Arc<V>) -> bool,
    {
        self.inner.write().remove_where(predicate)
    }

    /// Remove and return the least recently used entry.
    pub fn pop_lru(&self) -> Option<(K, Arc<V>)> {
        self.inner.write().pop_lru()
    }

    /// Observe the next eviction candidate without removing it.
    pub fn peek_lru(&self) -> Option<(K, Arc<V>)> {
        let guard = self.inner.read();
        guard.peek_lru().map(|(k, v)| (k.clone(), Arc::clone(v)))
    }

    /// Promote an entry without retrieving its value.
    pub fn touch(&self, key: &K) -> bool {
        self.inner.write().touch(key)
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Checks key existence without promotion.
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    /// Remove all entries. The hook stays silent.
    pub fn clear(&self) {
        self.inner.write().clear()
    }

    /// Snapshot of the operation counters.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> ConcurrentCache for ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
}

#[cfg(feature = "concurrency")]
impl<K, V> fmt::Debug for ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.read();
        f.debug_struct("ConcurrentBoundedLru")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K, V> Default for ConcurrentBoundedLru<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Creates a thread-safe cache with a default capacity of 16.
    fn default() -> Self {
        Self::new(16)
    }
}
