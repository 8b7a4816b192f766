//! # Metrics Trait Hierarchy
//!
//! This module mirrors the cache trait design by separating *recording*,
//! *snapshotting*, and *export* responsibilities into small, composable
//! traits. It enables production monitoring and bench/testing without
//! coupling those concerns to cache policy logic.
//!
//! ## Architecture
//!
//! ```text
//!            ┌─────────────────────────────┐
//!            │     CoreMetricsRecorder     │
//!            │  get_hit/get_miss/insert    │
//!            │  evict/clear                │
//!            └──────────────┬──────────────┘
//!                           │
//!                           ▼
//!            ┌─────────────────────────────┐     ┌─────────────────────────────┐
//!            │     LruMetricsRecorder      │     │   LruMetricsReadRecorder    │
//!            │  pop_lru/touch/remove/      │     │  peek/peek_lru/rank (&self, │
//!            │  remove_where/hook (&mut)   │     │  interior mutability)       │
//!            └─────────────────────────────┘     └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Design Goals
//! - **Single responsibility**: recorders only write counters; providers only
//!   read/snapshot; exporters only publish to monitoring systems.
//! - **Shared hierarchy**: the recency recorder extends the core recorder to
//!   reuse shared counters while adding recency-specific signals.
//! - **Environment split**:
//!   - Production: use lightweight recorders + exporters.
//!   - Bench/Test: use snapshot providers.

/// Common counters for any cache policy.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for LRU behavior (recency order, removal paths, eviction hook).
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_evict_hook_call(&mut self);
    fn record_remove_call(&mut self);
    fn record_remove_found(&mut self);
    fn record_remove_where_call(&mut self);
    fn record_remove_where_removed(&mut self);
    fn record_remove_where_scan_step(&mut self);
    fn record_pop_lru_call(&mut self);
    fn record_pop_lru_found(&mut self);
    fn record_touch_call(&mut self);
    fn record_touch_found(&mut self);
}

/// Read-only LRU metrics for &self methods (uses interior mutability).
///
/// Use this for cache operations that only take `&self` (e.g. `peek`,
/// `peek_lru`, `recency_rank`) where a mutable recorder is not available.
pub trait LruMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
    fn record_peek_lru_call(&self);
    fn record_peek_lru_found(&self);
    fn record_recency_rank_call(&self);
    fn record_recency_rank_found(&self);
    fn record_recency_rank_scan_step(&self);
}

/// Produces a point-in-time snapshot of recorded metrics.
///
/// Implemented by cache types; used by benches and tests to assert on
/// operation counts without reaching into recorder internals.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a metrics snapshot to an external monitoring system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
