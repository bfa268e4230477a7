use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

/// Tracks counters for a single analysis run.
///
/// Cloning shares the underlying counters, so every worker can record into the same set.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    files_succeeded: Arc<AtomicU64>,
    files_failed: Arc<AtomicU64>,
    lines_scanned: Arc<AtomicU64>,
    tokens_counted: Arc<AtomicU64>,
    tokens_filtered: Arc<AtomicU64>,
}

impl RunMetrics {
    /// Creates a new RunMetrics instance
    pub fn new() -> Self {
        Self {
            files_succeeded: Arc::new(AtomicU64::new(0)),
            files_failed: Arc::new(AtomicU64::new(0)),
            lines_scanned: Arc::new(AtomicU64::new(0)),
            tokens_counted: Arc::new(AtomicU64::new(0)),
            tokens_filtered: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a file that was read to the end
    pub fn record_file_success(&self) {
        self.files_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a file that could not be opened or was abandoned mid-read
    pub fn record_file_failure(&self) {
        self.files_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the lines and tokens a worker got through, whether or not it finished
    pub fn record_scan(&self, lines: u64, counted: u64, filtered: u64) {
        self.lines_scanned.fetch_add(lines, Ordering::Relaxed);
        self.tokens_counted.fetch_add(counted, Ordering::Relaxed);
        self.tokens_filtered.fetch_add(filtered, Ordering::Relaxed);
    }

    /// Gets the current counter values
    pub fn get_stats(&self) -> RunStats {
        RunStats {
            files_succeeded: self.files_succeeded.load(Ordering::Relaxed),
            files_failed: self.files_failed.load(Ordering::Relaxed),
            lines_scanned: self.lines_scanned.load(Ordering::Relaxed),
            tokens_counted: self.tokens_counted.load(Ordering::Relaxed),
            tokens_filtered: self.tokens_filtered.load(Ordering::Relaxed),
        }
    }

    /// Logs current run statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Run stats:\n\
             Files succeeded/failed: {}/{}\n\
             Lines scanned: {}\n\
             Tokens counted/filtered: {}/{}",
            stats.files_succeeded,
            stats.files_failed,
            stats.lines_scanned,
            stats.tokens_counted,
            stats.tokens_filtered
        );
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of [`RunMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub files_succeeded: u64,
    pub files_failed: u64,
    pub lines_scanned: u64,
    pub tokens_counted: u64,
    pub tokens_filtered: u64,
}
