// ==============================================
// LIBRARY-WIDE INVARIANT TESTS (integration)
// ==============================================
//
// Tests that verify behavioral consistency across the public surfaces of the
// library (core type, builder wrapper, trait bounds). These span multiple
// modules and belong here rather than in any single source file.

// ==============================================
// Capacity-0 Behavior
// ==============================================
//
// The infallible constructors honor capacity=0 as "accepts no items" rather
// than coercing it to 1; the fallible constructors reject it outright. Both
// choices must stay consistent across every construction path.

mod zero_capacity {
    use evictkit::policy::lru::BoundedLru;
    use evictkit::traits::{CoreCache, ReadOnlyCache};
    use std::sync::Arc;

    #[test]
    fn capacity_zero_is_honored() {
        let cache: BoundedLru<String, i32> = BoundedLru::new(0);

        assert_eq!(
            cache.capacity(),
            0,
            "BoundedLru::new(0) should honor capacity=0, not coerce to {}",
            cache.capacity()
        );
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        let mut cache: BoundedLru<String, i32> = BoundedLru::new(0);
        cache.insert("key".to_string(), Arc::new(42));

        assert_eq!(
            cache.len(),
            0,
            "BoundedLru with capacity=0 should reject inserts"
        );
    }

    #[test]
    fn try_constructors_reject_capacity_zero() {
        assert!(BoundedLru::<String, i32>::try_new(0).is_err());
        assert!(BoundedLru::<String, i32>::try_with_hook(0, |_k, _v| {}).is_err());
        assert!(BoundedLru::<String, i32>::try_new(1).is_ok());
    }

    #[test]
    fn builder_try_build_rejects_capacity_zero() {
        use evictkit::builder::CacheBuilder;

        assert!(CacheBuilder::new(0).try_build::<String, i32>().is_err());
        assert!(CacheBuilder::new(1).try_build::<String, i32>().is_ok());
    }
}

// ==============================================
// Surface Consistency
// ==============================================
//
// The builder wrapper must preserve the core's eviction semantics; generic
// callers bounded on the traits must see the same behavior as concrete ones.

mod surface_consistency {
    use evictkit::builder::CacheBuilder;
    use evictkit::policy::lru::BoundedLru;
    use evictkit::traits::{CoreCache, MutableCache, ReadOnlyCache, RecencyCache};
    use std::sync::Arc;

    fn drain_keys<C: RecencyCache<String, Arc<u32>>>(cache: &mut C) -> Vec<String> {
        let mut keys = Vec::new();
        while let Some((key, _)) = cache.pop_lru() {
            keys.push(key);
        }
        keys
    }

    #[test]
    fn generic_callers_observe_lru_order() {
        let mut cache: BoundedLru<String, u32> = BoundedLru::new(4);
        for i in 1..=4u32 {
            cache.insert(i.to_string(), Arc::new(i));
        }
        cache.get(&"2".to_string());
        cache.get(&"3".to_string());

        assert_eq!(
            drain_keys(&mut cache),
            vec!["1".to_string(), "4".to_string(), "2".to_string(), "3".to_string()]
        );
    }

    #[test]
    fn wrapper_and_core_agree_on_eviction() {
        let mut core: BoundedLru<String, u32> = BoundedLru::new(2);
        let mut wrapped = CacheBuilder::new(2).build::<String, u32>();

        for i in 1..=4u32 {
            core.insert(i.to_string(), Arc::new(i));
            wrapped.insert(i.to_string(), i);
        }

        for i in 1..=4u32 {
            let key = i.to_string();
            assert_eq!(core.contains(&key), wrapped.contains(&key));
        }
        assert_eq!(core.len(), wrapped.len());
    }

    #[test]
    fn remove_where_counts_match_across_surfaces() {
        let mut core: BoundedLru<String, u32> = BoundedLru::new(8);
        let mut wrapped = CacheBuilder::new(8).build::<String, u32>();

        for i in 0..8u32 {
            core.insert(i.to_string(), Arc::new(i));
            wrapped.insert(i.to_string(), i);
        }

        let removed_core = core.remove_where(|_, value| **value % 3 == 0);
        let removed_wrapped = wrapped.remove_where(|_, value| value % 3 == 0);

        assert_eq!(removed_core, 3);
        assert_eq!(removed_core, removed_wrapped);
        assert_eq!(core.len(), wrapped.len());
    }
}

// ==============================================
// Hook Contract
// ==============================================
//
// The eviction hook fires for capacity-overflow evictions only, on every
// construction path that installs one.

mod hook_contract {
    use evictkit::builder::CacheBuilder;
    use evictkit::policy::lru::BoundedLru;
    use evictkit::traits::{CoreCache, MutableCache, RecencyCache};
    use std::sync::{Arc, Mutex};

    fn counting_hook(
        counter: &Arc<Mutex<usize>>,
    ) -> impl FnMut(String, Arc<u32>) + Send + 'static {
        let counter = Arc::clone(counter);
        move |_key, _value| {
            *counter.lock().unwrap() += 1;
        }
    }

    #[test]
    fn core_hook_counts_only_overflows() {
        let count = Arc::new(Mutex::new(0usize));
        let mut cache = BoundedLru::with_hook(2, counting_hook(&count));

        for i in 0..5u32 {
            cache.insert(i.to_string(), Arc::new(i));
        }
        assert_eq!(*count.lock().unwrap(), 3);

        // Caller-initiated removal stays silent
        cache.remove(&"3".to_string());
        cache.pop_lru();
        cache.remove_where(|_, _| true);
        cache.clear();
        assert_eq!(*count.lock().unwrap(), 3);
    }

    #[test]
    fn builder_hook_counts_only_overflows() {
        let count = Arc::new(Mutex::new(0usize));
        let mut cache = CacheBuilder::new(2).on_evict(counting_hook(&count)).build();

        for i in 0..5u32 {
            cache.insert(i.to_string(), i);
        }
        assert_eq!(*count.lock().unwrap(), 3);

        cache.remove(&"3".to_string());
        cache.pop_lru();
        cache.clear();
        assert_eq!(*count.lock().unwrap(), 3);
    }
}
