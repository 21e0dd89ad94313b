//! Strategy runner: executes one term-selection strategy over the query
//! corpus on a bounded worker pool.
//!
//! Every failure below configuration level is isolated to its query: an
//! unreadable document or a failed backend call is logged, counted, and
//! skipped, and the run keeps going. The two strategies share nothing but
//! the backend handle, so [`run_comparison`] executes them concurrently.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::backend::{QueryExecutor, QueryResult, SearchBackend};
use crate::error::{PanbenchError, Result};
use crate::expansion::{Strategy, SynonymLexicon, TermExpander};
use crate::pipeline::config::EvalConfig;
use crate::pipeline::metrics::RunStats;

/// Everything one strategy produced: per-query results plus the merged
/// stats accumulator.
#[derive(Debug)]
pub struct StrategyOutcome {
    /// The strategy that produced these results.
    pub strategy: Strategy,
    /// One entry per completed query, in no particular order.
    pub results: Vec<QueryResult>,
    /// Merged counters and timings.
    pub stats: RunStats,
}

/// Both strategies' outcomes for one run.
#[derive(Debug)]
pub struct ComparisonOutcome {
    /// "Approach 4": no stopword filtering.
    pub no_filter: StrategyOutcome,
    /// "Approach 6": stopword filtering before ranking.
    pub stopword_filter: StrategyOutcome,
}

/// Runs one strategy over a list of query documents.
pub struct StrategyRunner {
    expander: TermExpander,
    executor: QueryExecutor,
    index_name: String,
    top_n_terms: usize,
    result_limit: usize,
    threads: usize,
}

impl StrategyRunner {
    /// Create a runner for `strategy` against `backend`.
    pub fn new(
        strategy: Strategy,
        lexicon: SynonymLexicon,
        backend: Arc<dyn SearchBackend>,
        config: &EvalConfig,
    ) -> Self {
        StrategyRunner {
            expander: TermExpander::new(strategy, lexicon, config.top_n_terms),
            executor: QueryExecutor::new(backend).with_timeout(config.search_timeout),
            index_name: config.index_name.clone(),
            top_n_terms: config.top_n_terms,
            result_limit: config.result_limit,
            threads: config.thread_count(),
        }
    }

    /// Process every query document, in parallel, and merge the outcomes.
    pub fn run(&self, query_paths: &[PathBuf]) -> Result<StrategyOutcome> {
        let label = self.expander.strategy().label();
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(move |i| format!("{label}-worker-{i}"))
            .build()
            .map_err(|e| PanbenchError::other(format!("failed to create worker pool: {e}")))?;

        let (results, stats) = pool.install(|| {
            query_paths
                .par_iter()
                .map(|path| self.process_query(path))
                .fold(
                    || (Vec::new(), RunStats::default()),
                    |(mut results, mut stats), (result, delta)| {
                        results.extend(result);
                        stats.merge(&delta);
                        (results, stats)
                    },
                )
                .reduce(
                    || (Vec::new(), RunStats::default()),
                    |(mut results_a, mut stats_a), (results_b, stats_b)| {
                        results_a.extend(results_b);
                        stats_a.merge(&stats_b);
                        (results_a, stats_a)
                    },
                )
        });

        info!(
            strategy = label,
            completed = stats.queries_completed,
            failed = stats.queries_failed,
            skipped = stats.documents_skipped,
            "strategy run finished"
        );

        Ok(StrategyOutcome {
            strategy: self.expander.strategy(),
            results,
            stats,
        })
    }

    /// Handle a single query document, returning its result (if any) and a
    /// stats delta for the reduction step.
    fn process_query(&self, path: &PathBuf) -> (Option<QueryResult>, RunStats) {
        let mut stats = RunStats {
            queries_total: 1,
            ..RunStats::default()
        };

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unreadable query document");
                stats.documents_skipped = 1;
                return (None, stats);
            }
        };

        let preprocessing_start = Instant::now();
        let mut term_set = self.expander.expand(&text);
        term_set.truncate(self.top_n_terms);
        let preprocessing_latency = preprocessing_start.elapsed();
        stats.preprocessing_time = preprocessing_latency;

        match self.executor.execute(
            &self.index_name,
            path.clone(),
            term_set,
            preprocessing_latency,
            self.result_limit,
        ) {
            Ok(result) => {
                stats.queries_completed = 1;
                stats.total_hits = result.hits.len() as u64;
                stats.search_time = result.search_latency;
                (Some(result), stats)
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "query skipped after backend failure");
                stats.queries_failed = 1;
                (None, stats)
            }
        }
    }
}

/// Run both strategies concurrently over the same query documents and
/// shared backend.
pub fn run_comparison(
    backend: Arc<dyn SearchBackend>,
    lexicon: SynonymLexicon,
    config: &EvalConfig,
    query_paths: &[PathBuf],
) -> Result<ComparisonOutcome> {
    config.validate()?;

    let no_filter_runner = StrategyRunner::new(
        Strategy::NoFilter,
        lexicon.clone(),
        Arc::clone(&backend),
        config,
    );
    let stopword_runner = StrategyRunner::new(Strategy::StopwordFilter, lexicon, backend, config);

    let (no_filter, stopword_filter) = std::thread::scope(|scope| {
        let no_filter_handle = scope.spawn(|| no_filter_runner.run(query_paths));
        let stopword_handle = scope.spawn(|| stopword_runner.run(query_paths));
        (
            no_filter_handle.join().expect("strategy thread panicked"),
            stopword_handle.join().expect("strategy thread panicked"),
        )
    });

    Ok(ComparisonOutcome {
        no_filter: no_filter?,
        stopword_filter: stopword_filter?,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::backend::{MemoryBackend, SourceDocument};

    fn backend_with_sources(sources: &[(&str, &str)]) -> Arc<MemoryBackend> {
        let backend = MemoryBackend::new();
        let batch: Vec<SourceDocument> = sources
            .iter()
            .map(|(name, content)| SourceDocument {
                filename: name.to_string(),
                content: content.to_string(),
            })
            .collect();
        backend.bulk_index("index", &batch).unwrap();
        Arc::new(backend)
    }

    fn query_corpus(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::write(&path, content).unwrap();
            paths.push(path);
        }
        (dir, paths)
    }

    #[test]
    fn test_run_produces_one_result_per_readable_query() {
        let backend = backend_with_sources(&[
            ("source-1.txt", "alpha beta gamma"),
            ("source-2.txt", "delta epsilon"),
        ]);
        let (_dir, paths) =
            query_corpus(&[("q1.txt", "alpha alpha beta"), ("q2.txt", "delta delta")]);

        let config = EvalConfig::default().with_threads(2);
        let runner = StrategyRunner::new(
            Strategy::NoFilter,
            SynonymLexicon::new(),
            backend,
            &config,
        );
        let outcome = runner.run(&paths).unwrap();

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.stats.queries_total, 2);
        assert_eq!(outcome.stats.queries_completed, 2);
        assert_eq!(outcome.stats.queries_failed, 0);
        assert!(outcome.stats.total_hits >= 2);
    }

    #[test]
    fn test_missing_query_document_is_skipped() {
        let backend = backend_with_sources(&[("source-1.txt", "alpha")]);
        let (dir, mut paths) = query_corpus(&[("q1.txt", "alpha")]);
        paths.push(dir.path().join("does-not-exist.txt"));

        let config = EvalConfig::default().with_threads(1);
        let runner = StrategyRunner::new(
            Strategy::NoFilter,
            SynonymLexicon::new(),
            backend,
            &config,
        );
        let outcome = runner.run(&paths).unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.stats.documents_skipped, 1);
        assert_eq!(outcome.stats.queries_total, 2);
    }

    #[test]
    fn test_run_comparison_yields_both_strategies() {
        let backend = backend_with_sources(&[("source-1.txt", "the plagiarism corpus")]);
        let (_dir, paths) = query_corpus(&[("q1.txt", "the the plagiarism")]);

        let config = EvalConfig::default().with_threads(1);
        let outcome =
            run_comparison(backend, SynonymLexicon::new(), &config, &paths).unwrap();

        assert_eq!(outcome.no_filter.strategy, Strategy::NoFilter);
        assert_eq!(outcome.stopword_filter.strategy, Strategy::StopwordFilter);
        assert_eq!(outcome.no_filter.results.len(), 1);
        assert_eq!(outcome.stopword_filter.results.len(), 1);
    }

    #[test]
    fn test_run_comparison_validates_config() {
        let backend = backend_with_sources(&[]);
        let config = EvalConfig::default().with_result_limit(1).with_k_values(vec![10]);

        let result = run_comparison(backend, SynonymLexicon::new(), &config, &[]);
        assert!(matches!(result, Err(PanbenchError::Config(_))));
    }
}
