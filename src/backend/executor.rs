//! Query execution against the search backend.
//!
//! The executor owns the per-query behavior the evaluation depends on:
//! every backend call runs under a wall-clock deadline, and raw hit lists
//! are deduplicated by filename before anything downstream sees them.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ahash::AHashSet;
use crossbeam_channel::{RecvTimeoutError, bounded};

use crate::backend::{DisjunctiveQuery, Hit, SearchBackend};
use crate::error::{PanbenchError, Result};

/// Default per-query search deadline.
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(100);

/// The outcome of one executed query: the deduplicated hits plus the
/// latencies that feed throughput reporting. Immutable once produced.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Path of the query document this result was produced for.
    pub query_path: PathBuf,
    /// The expanded, truncated term set that was submitted.
    pub term_set: Vec<String>,
    /// Deduplicated hits, in backend rank order.
    pub hits: Vec<Hit>,
    /// Wall-clock time of the backend round trip.
    pub search_latency: Duration,
    /// Time spent turning the document text into the term set.
    pub preprocessing_latency: Duration,
}

/// Executes bounded term-set queries against a shared backend.
#[derive(Clone)]
pub struct QueryExecutor {
    backend: Arc<dyn SearchBackend>,
    timeout: Duration,
}

impl QueryExecutor {
    /// Create an executor over `backend` with the default timeout.
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        QueryExecutor {
            backend,
            timeout: DEFAULT_SEARCH_TIMEOUT,
        }
    }

    /// Set the per-query search deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Execute a query built from `term_set` against `index`.
    ///
    /// `result_limit` is the number of hits requested from the backend; it
    /// must be at least the largest evaluation cutoff `k`, otherwise recall
    /// is under-estimated downstream. `preprocessing_latency` is the time
    /// the caller spent producing the term set and is carried through for
    /// reporting.
    ///
    /// A call that exceeds the deadline fails with [`PanbenchError::Timeout`];
    /// callers treat any error here as query-granular and keep going.
    pub fn execute(
        &self,
        index: &str,
        query_path: PathBuf,
        term_set: Vec<String>,
        preprocessing_latency: Duration,
        result_limit: usize,
    ) -> Result<QueryResult> {
        let query = DisjunctiveQuery::over_content(term_set.clone(), result_limit);

        let start = Instant::now();
        let raw_hits = self.search_with_deadline(index, query)?;
        let search_latency = start.elapsed();

        Ok(QueryResult {
            query_path,
            term_set,
            hits: dedup_hits(raw_hits),
            search_latency,
            preprocessing_latency,
        })
    }

    /// Run the backend call on a helper thread and wait at most `timeout`.
    ///
    /// An abandoned call keeps running on its thread until the backend
    /// returns, but its result is discarded; no retry is performed.
    fn search_with_deadline(&self, index: &str, query: DisjunctiveQuery) -> Result<Vec<Hit>> {
        let (tx, rx) = bounded(1);
        let backend = Arc::clone(&self.backend);
        let index = index.to_string();

        std::thread::spawn(move || {
            let result = backend.search(&index, &query);
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(PanbenchError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(PanbenchError::backend("search worker terminated"))
            }
        }
    }
}

/// Keep at most one hit per filename, preserving first-seen (highest
/// backend rank) order.
pub fn dedup_hits(hits: Vec<Hit>) -> Vec<Hit> {
    let mut seen = AHashSet::new();
    hits.into_iter()
        .filter(|hit| seen.insert(hit.filename.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::SourceDocument;

    /// Backend stub returning a fixed hit list.
    struct FixedBackend {
        hits: Vec<Hit>,
    }

    impl SearchBackend for FixedBackend {
        fn search(&self, _index: &str, _query: &DisjunctiveQuery) -> Result<Vec<Hit>> {
            Ok(self.hits.clone())
        }

        fn bulk_index(&self, _index: &str, _batch: &[SourceDocument]) -> Result<()> {
            Ok(())
        }
    }

    /// Backend stub that blocks longer than any test timeout.
    struct StalledBackend;

    impl SearchBackend for StalledBackend {
        fn search(&self, _index: &str, _query: &DisjunctiveQuery) -> Result<Vec<Hit>> {
            std::thread::sleep(Duration::from_secs(5));
            Ok(Vec::new())
        }

        fn bulk_index(&self, _index: &str, _batch: &[SourceDocument]) -> Result<()> {
            Ok(())
        }
    }

    fn hit(filename: &str, score: f64) -> Hit {
        Hit {
            filename: filename.to_string(),
            score,
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let deduped = dedup_hits(vec![
            hit("a.txt", 3.0),
            hit("b.txt", 2.5),
            hit("a.txt", 2.0),
            hit("c.txt", 1.0),
            hit("b.txt", 0.5),
        ]);

        let names: Vec<_> = deduped.iter().map(|h| h.filename.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
        assert_eq!(deduped[0].score, 3.0);
    }

    #[test]
    fn test_execute_returns_deduplicated_result() {
        let backend = Arc::new(FixedBackend {
            hits: vec![hit("x.txt", 2.0), hit("x.txt", 1.0), hit("y.txt", 0.5)],
        });
        let executor = QueryExecutor::new(backend);

        let result = executor
            .execute(
                "idx",
                PathBuf::from("query.txt"),
                vec!["term".to_string()],
                Duration::from_millis(1),
                10,
            )
            .unwrap();

        assert_eq!(result.hits.len(), 2);
        assert_eq!(result.term_set, vec!["term"]);
        assert_eq!(result.query_path, PathBuf::from("query.txt"));
    }

    #[test]
    fn test_execute_times_out() {
        let executor =
            QueryExecutor::new(Arc::new(StalledBackend)).with_timeout(Duration::from_millis(50));

        let result = executor.execute(
            "idx",
            PathBuf::from("query.txt"),
            vec!["term".to_string()],
            Duration::ZERO,
            10,
        );

        assert!(matches!(result, Err(PanbenchError::Timeout(_))));
    }

    #[test]
    fn test_fewer_hits_than_limit_is_valid() {
        let backend = Arc::new(FixedBackend {
            hits: vec![hit("only.txt", 1.0)],
        });
        let executor = QueryExecutor::new(backend);

        let result = executor
            .execute(
                "idx",
                PathBuf::from("q.txt"),
                vec!["term".to_string()],
                Duration::ZERO,
                10,
            )
            .unwrap();
        assert_eq!(result.hits.len(), 1);
    }
}
