//! Per-run statistics accumulation.
//!
//! Each worker produces a stats delta for its own query; deltas are merged
//! by reduction into one [`RunStats`] per strategy. No shared counters, so
//! the per-query work parallelizes without locking.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Counters and timings for one strategy run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Query documents attempted.
    pub queries_total: u64,
    /// Query documents skipped because their file could not be read.
    pub documents_skipped: u64,
    /// Queries dropped after a backend failure or timeout.
    pub queries_failed: u64,
    /// Queries that produced a result.
    pub queries_completed: u64,
    /// Unique hits accumulated across completed queries.
    pub total_hits: u64,
    /// Total time spent in term expansion.
    pub preprocessing_time: Duration,
    /// Total time spent in backend round trips, completed queries only.
    pub search_time: Duration,
}

impl RunStats {
    /// Merge another accumulator into this one.
    pub fn merge(&mut self, other: &RunStats) {
        self.queries_total += other.queries_total;
        self.documents_skipped += other.documents_skipped;
        self.queries_failed += other.queries_failed;
        self.queries_completed += other.queries_completed;
        self.total_hits += other.total_hits;
        self.preprocessing_time += other.preprocessing_time;
        self.search_time += other.search_time;
    }

    /// Number of queries whose text was expanded (readable documents).
    pub fn queries_expanded(&self) -> u64 {
        self.queries_total - self.documents_skipped
    }

    /// Mean term-expansion time per expanded query.
    pub fn mean_preprocessing_time(&self) -> Duration {
        let expanded = self.queries_expanded();
        if expanded == 0 {
            Duration::ZERO
        } else {
            self.preprocessing_time / expanded as u32
        }
    }

    /// Mean backend round-trip time per completed query. Failed queries do
    /// not contribute.
    pub fn mean_search_time(&self) -> Duration {
        if self.queries_completed == 0 {
            Duration::ZERO
        } else {
            self.search_time / self.queries_completed as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_sums_everything() {
        let mut a = RunStats {
            queries_total: 3,
            documents_skipped: 1,
            queries_failed: 0,
            queries_completed: 2,
            total_hits: 10,
            preprocessing_time: Duration::from_millis(20),
            search_time: Duration::from_millis(200),
        };
        let b = RunStats {
            queries_total: 2,
            documents_skipped: 0,
            queries_failed: 1,
            queries_completed: 1,
            total_hits: 4,
            preprocessing_time: Duration::from_millis(10),
            search_time: Duration::from_millis(50),
        };

        a.merge(&b);
        assert_eq!(a.queries_total, 5);
        assert_eq!(a.queries_completed, 3);
        assert_eq!(a.queries_failed, 1);
        assert_eq!(a.total_hits, 14);
        assert_eq!(a.preprocessing_time, Duration::from_millis(30));
        assert_eq!(a.search_time, Duration::from_millis(250));
    }

    #[test]
    fn test_means_over_the_right_denominators() {
        let stats = RunStats {
            queries_total: 4,
            documents_skipped: 1,
            queries_failed: 1,
            queries_completed: 2,
            total_hits: 6,
            preprocessing_time: Duration::from_millis(30),
            search_time: Duration::from_millis(100),
        };

        // Preprocessing ran for the 3 readable documents, search latency is
        // averaged over the 2 completed queries only.
        assert_eq!(stats.mean_preprocessing_time(), Duration::from_millis(10));
        assert_eq!(stats.mean_search_time(), Duration::from_millis(50));
    }

    #[test]
    fn test_means_with_zero_denominators() {
        let stats = RunStats::default();
        assert_eq!(stats.mean_preprocessing_time(), Duration::ZERO);
        assert_eq!(stats.mean_search_time(), Duration::ZERO);
    }
}
