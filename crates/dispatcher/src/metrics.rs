//! Dispatcher metrics for observability
//!
//! Counts are kept locally for reporting and mirrored to the `metrics`
//! facade, which is a no-op until a recorder is installed.

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;

/// Metrics for a single dispatcher
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Streams handed out
    opened_count: AtomicU64,
    /// Open attempts that failed
    open_failure_count: AtomicU64,
    /// Streams closed cleanly
    closed_count: AtomicU64,
    /// Close attempts that failed to flush
    close_failure_count: AtomicU64,
    /// Bytes written through streams that were closed
    bytes_written: AtomicU64,
}

impl DispatchMetrics {
    /// Create new metrics instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_open(&self, dispatcher: &str) {
        self.opened_count.fetch_add(1, Ordering::Relaxed);
        counter!("sheet_dispatch_streams_opened_total", "dispatcher" => dispatcher.to_string())
            .increment(1);
    }

    pub fn record_open_failure(&self, dispatcher: &str) {
        self.open_failure_count.fetch_add(1, Ordering::Relaxed);
        counter!("sheet_dispatch_open_failures_total", "dispatcher" => dispatcher.to_string())
            .increment(1);
    }

    pub fn record_close(&self, dispatcher: &str, bytes_written: u64) {
        self.closed_count.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(bytes_written, Ordering::Relaxed);
        counter!("sheet_dispatch_streams_closed_total", "dispatcher" => dispatcher.to_string())
            .increment(1);
        counter!("sheet_dispatch_bytes_written_total", "dispatcher" => dispatcher.to_string())
            .increment(bytes_written);
    }

    pub fn record_close_failure(&self, dispatcher: &str) {
        self.close_failure_count.fetch_add(1, Ordering::Relaxed);
        counter!("sheet_dispatch_close_failures_total", "dispatcher" => dispatcher.to_string())
            .increment(1);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            opened_count: self.opened_count.load(Ordering::Relaxed),
            open_failure_count: self.open_failure_count.load(Ordering::Relaxed),
            closed_count: self.closed_count.load(Ordering::Relaxed),
            close_failure_count: self.close_failure_count.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatcher metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub opened_count: u64,
    pub open_failure_count: u64,
    pub closed_count: u64,
    pub close_failure_count: u64,
    pub bytes_written: u64,
}

impl MetricsSnapshot {
    /// Streams opened but not yet closed
    pub fn outstanding(&self) -> u64 {
        self.opened_count
            .saturating_sub(self.closed_count + self.close_failure_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_counts() {
        let metrics = DispatchMetrics::new();

        metrics.record_open("test");
        metrics.record_open("test");
        metrics.record_open_failure("test");
        metrics.record_close("test", 12);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.opened_count, 2);
        assert_eq!(snapshot.open_failure_count, 1);
        assert_eq!(snapshot.closed_count, 1);
        assert_eq!(snapshot.bytes_written, 12);
        assert_eq!(snapshot.outstanding(), 1);
    }
}
