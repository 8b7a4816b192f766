use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::LruMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// This exporter writes in the Prometheus text exposition format so it can be
/// scraped by Prometheus or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .expect("metrics exporter writer poisoned")
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.write_counter(&self.metric_name("get_hits_total"), snapshot.get_hits);
        self.write_counter(&self.metric_name("get_misses_total"), snapshot.get_misses);
        self.write_counter(
            &self.metric_name("insert_calls_total"),
            snapshot.insert_calls,
        );
        self.write_counter(
            &self.metric_name("insert_updates_total"),
            snapshot.insert_updates,
        );
        self.write_counter(&self.metric_name("insert_new_total"), snapshot.insert_new);
        self.write_counter(&self.metric_name("evict_calls_total"), snapshot.evict_calls);
        self.write_counter(
            &self.metric_name("evicted_entries_total"),
            snapshot.evicted_entries,
        );
        self.write_counter(
            &self.metric_name("evict_hook_calls_total"),
            snapshot.evict_hook_calls,
        );
        self.write_counter(
            &self.metric_name("remove_calls_total"),
            snapshot.remove_calls,
        );
        self.write_counter(
            &self.metric_name("remove_found_total"),
            snapshot.remove_found,
        );
        self.write_counter(
            &self.metric_name("remove_where_calls_total"),
            snapshot.remove_where_calls,
        );
        self.write_counter(
            &self.metric_name("remove_where_removed_total"),
            snapshot.remove_where_removed,
        );
        self.write_counter(
            &self.metric_name("remove_where_scan_steps_total"),
            snapshot.remove_where_scan_steps,
        );
        self.write_counter(
            &self.metric_name("pop_lru_calls_total"),
            snapshot.pop_lru_calls,
        );
        self.write_counter(
            &self.metric_name("pop_lru_found_total"),
            snapshot.pop_lru_found,
        );
        self.write_counter(&self.metric_name("peek_calls_total"), snapshot.peek_calls);
        self.write_counter(&self.metric_name("peek_found_total"), snapshot.peek_found);
        self.write_counter(
            &self.metric_name("peek_lru_calls_total"),
            snapshot.peek_lru_calls,
        );
        self.write_counter(
            &self.metric_name("peek_lru_found_total"),
            snapshot.peek_lru_found,
        );
        self.write_counter(&self.metric_name("touch_calls_total"), snapshot.touch_calls);
        self.write_counter(&self.metric_name("touch_found_total"), snapshot.touch_found);
        self.write_counter(&self.metric_name("clear_calls_total"), snapshot.clear_calls);
        self.write_counter(
            &self.metric_name("recency_rank_calls_total"),
            snapshot.recency_rank_calls,
        );
        self.write_counter(
            &self.metric_name("recency_rank_found_total"),
            snapshot.recency_rank_found,
        );
        self.write_counter(
            &self.metric_name("recency_rank_scan_steps_total"),
            snapshot.recency_rank_scan_steps,
        );
        self.write_gauge(&self.metric_name("cache_len"), snapshot.cache_len as u64);
        self.write_gauge(&self.metric_name("capacity"), snapshot.capacity as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exports_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("evictkit", Vec::new());
        let snapshot = LruMetricsSnapshot {
            get_hits: 5,
            get_misses: 2,
            cache_len: 3,
            capacity: 8,
            ..Default::default()
        };

        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE evictkit_get_hits_total counter"));
        assert!(text.contains("evictkit_get_hits_total 5"));
        assert!(text.contains("evictkit_get_misses_total 2"));
        assert!(text.contains("# TYPE evictkit_cache_len gauge"));
        assert!(text.contains("evictkit_cache_len 3"));
        assert!(text.contains("evictkit_capacity 8"));
    }

    #[test]
    fn empty_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&LruMetricsSnapshot::default());

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE get_hits_total counter"));
        assert!(!text.contains("_get_hits_total"));
    }
}
