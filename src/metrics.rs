// Run metrics module
//
// Lightweight counters for a normalization run, logged once at the end

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Counters for a normalization run
///
/// Uses atomic operations so the counters can be updated through a shared
/// reference. Logged on completion via [`Metrics::log_summary`].
#[derive(Debug)]
pub struct Metrics {
    /// Files read, rewritten and written back
    pub files_updated: AtomicUsize,

    /// Listed files that did not exist and were skipped
    pub files_missing: AtomicUsize,

    /// Attribute occurrences rewritten across all files
    pub replacements: AtomicUsize,

    /// Bytes written back to disk
    pub bytes_written: AtomicU64,

    /// Total read-rewrite-write time in microseconds
    pub total_rewrite_time_us: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            files_updated: AtomicUsize::new(0),
            files_missing: AtomicUsize::new(0),
            replacements: AtomicUsize::new(0),
            bytes_written: AtomicU64::new(0),
            total_rewrite_time_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a rewritten file
    pub fn record_file_updated(&self, replacements: usize, bytes_written: usize) {
        self.files_updated.fetch_add(1, Ordering::Relaxed);
        self.replacements.fetch_add(replacements, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(bytes_written as u64, Ordering::Relaxed);
    }

    /// Record a skipped (missing) file
    pub fn record_file_missing(&self) {
        self.files_missing.fetch_add(1, Ordering::Relaxed);
    }

    /// Record read-rewrite-write time for one file
    pub fn record_rewrite_time(&self, duration: Duration) {
        self.total_rewrite_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get average rewrite time per updated file in milliseconds
    pub fn avg_rewrite_time_ms(&self) -> f64 {
        let total = self.total_rewrite_time_us.load(Ordering::Relaxed);
        let count = self.files_updated.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / 1000.0 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Normalization Summary ===");
        tracing::info!("Uptime: {:.3}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Files: {} updated, {} missing",
            self.files_updated.load(Ordering::Relaxed),
            self.files_missing.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Replacements: {}, bytes written: {} (avg: {:.2}ms per file)",
            self.replacements.load(Ordering::Relaxed),
            self.bytes_written.load(Ordering::Relaxed),
            self.avg_rewrite_time_ms()
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.files_updated.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.files_missing.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_file_operations() {
        let metrics = Metrics::new();

        metrics.record_file_updated(3, 120);
        metrics.record_file_updated(0, 80);
        metrics.record_file_missing();

        assert_eq!(metrics.files_updated.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.files_missing.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.replacements.load(Ordering::Relaxed), 3);
        assert_eq!(metrics.bytes_written.load(Ordering::Relaxed), 200);
    }

    #[test]
    fn test_record_rewrite_time() {
        let metrics = Metrics::new();

        metrics.record_file_updated(1, 10);
        metrics.record_rewrite_time(Duration::from_millis(2));
        metrics.record_file_updated(1, 10);
        metrics.record_rewrite_time(Duration::from_millis(4));

        assert_eq!(metrics.total_rewrite_time_us.load(Ordering::Relaxed), 6000);
        assert_eq!(metrics.avg_rewrite_time_ms(), 3.0);
    }

    #[test]
    fn test_avg_rewrite_time_no_files() {
        let metrics = Metrics::new();
        assert_eq!(metrics.avg_rewrite_time_ms(), 0.0);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
