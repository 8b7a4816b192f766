use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsReadRecorder, LruMetricsRecorder};

/// Operation counters for the bounded LRU cache.
///
/// Plain `u64` fields are written through `&mut self` recorder methods;
/// [`MetricsCell`] fields back the `&self` read paths.
#[derive(Debug, Default)]
pub struct LruMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub evict_hook_calls: u64,
    pub remove_calls: u64,
    pub remove_found: u64,
    pub remove_where_calls: u64,
    pub remove_where_removed: u64,
    pub remove_where_scan_steps: u64,
    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub touch_calls: u64,
    pub touch_found: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
    pub peek_lru_calls: MetricsCell,
    pub peek_lru_found: MetricsCell,
    pub recency_rank_calls: MetricsCell,
    pub recency_rank_found: MetricsCell,
    pub recency_rank_scan_steps: MetricsCell,
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_evict_hook_call(&mut self) {
        self.evict_hook_calls += 1;
    }

    fn record_remove_call(&mut self) {
        self.remove_calls += 1;
    }

    fn record_remove_found(&mut self) {
        self.remove_found += 1;
    }

    fn record_remove_where_call(&mut self) {
        self.remove_where_calls += 1;
    }

    fn record_remove_where_removed(&mut self) {
        self.remove_where_removed += 1;
    }

    fn record_remove_where_scan_step(&mut self) {
        self.remove_where_scan_steps += 1;
    }

    fn record_pop_lru_call(&mut self) {
        self.pop_lru_calls += 1;
    }

    fn record_pop_lru_found(&mut self) {
        self.pop_lru_found += 1;
    }

    fn record_touch_call(&mut self) {
        self.touch_calls += 1;
    }

    fn record_touch_found(&mut self) {
        self.touch_found += 1;
    }
}

impl LruMetricsReadRecorder for LruMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }

    fn record_peek_found(&self) {
        self.peek_found.incr();
    }

    fn record_peek_lru_call(&self) {
        self.peek_lru_calls.incr();
    }

    fn record_peek_lru_found(&self) {
        self.peek_lru_found.incr();
    }

    fn record_recency_rank_call(&self) {
        self.recency_rank_calls.incr();
    }

    fn record_recency_rank_found(&self) {
        self.recency_rank_found.incr();
    }

    fn record_recency_rank_scan_step(&self) {
        self.recency_rank_scan_steps.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mut_recorders_increment_counters() {
        let mut metrics = LruMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_evict_hook_call();

        assert_eq!(metrics.get_hits, 2);
        assert_eq!(metrics.get_misses, 1);
        assert_eq!(metrics.evict_hook_calls, 1);
    }

    #[test]
    fn read_recorders_increment_through_shared_ref() {
        let metrics = LruMetrics::default();
        metrics.record_peek_call();
        metrics.record_peek_call();
        metrics.record_peek_found();

        assert_eq!(metrics.peek_calls.get(), 2);
        assert_eq!(metrics.peek_found.get(), 1);
    }
}
