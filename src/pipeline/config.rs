//! Configuration for evaluation runs.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::executor::DEFAULT_SEARCH_TIMEOUT;
use crate::backend::ingest::DEFAULT_BATCH_SIZE;
use crate::error::{PanbenchError, Result};
use crate::eval::DEFAULT_K_VALUES;

/// Configuration for one evaluation run (both strategies).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Name of the backend index holding the source documents.
    pub index_name: String,

    /// Number of frequency-ranked base terms selected per query document.
    pub top_n_terms: usize,

    /// Number of hits requested from the backend per query. Must be at
    /// least the largest evaluation cutoff, or recall is under-estimated.
    pub result_limit: usize,

    /// Evaluation cutoff depths, ascending.
    pub k_values: Vec<usize>,

    /// Wall-clock deadline per backend search call.
    pub search_timeout: Duration,

    /// Global cap on accepted ground-truth records.
    pub ground_truth_limit: usize,

    /// Documents per ingestion batch.
    pub batch_size: usize,

    /// Worker pool size per strategy.
    /// If None, uses the number of CPU cores.
    pub threads: Option<usize>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            index_name: "index".to_string(),
            top_n_terms: 10,
            result_limit: 10,
            k_values: DEFAULT_K_VALUES.to_vec(),
            search_timeout: DEFAULT_SEARCH_TIMEOUT,
            ground_truth_limit: 64,
            batch_size: DEFAULT_BATCH_SIZE,
            threads: None,
        }
    }
}

impl EvalConfig {
    /// Set the backend index name.
    pub fn with_index_name<S: Into<String>>(mut self, name: S) -> Self {
        self.index_name = name.into();
        self
    }

    /// Set the number of base terms selected per query.
    pub fn with_top_n_terms(mut self, top_n: usize) -> Self {
        self.top_n_terms = top_n;
        self
    }

    /// Set the per-query hit budget.
    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Set the evaluation cutoffs.
    pub fn with_k_values(mut self, k_values: Vec<usize>) -> Self {
        self.k_values = k_values;
        self
    }

    /// Set the per-query search deadline.
    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    /// Set the ground-truth record cap.
    pub fn with_ground_truth_limit(mut self, limit: usize) -> Self {
        self.ground_truth_limit = limit;
        self
    }

    /// Set the ingestion batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the worker pool size per strategy.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Effective worker pool size.
    pub fn thread_count(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    /// Check the invariants a run depends on. Violations are configuration
    /// mistakes and abort the run.
    pub fn validate(&self) -> Result<()> {
        if self.top_n_terms == 0 {
            return Err(PanbenchError::config("top_n_terms must be positive"));
        }
        if self.k_values.is_empty() {
            return Err(PanbenchError::config("k_values must not be empty"));
        }
        let max_k = self.k_values.iter().copied().max().unwrap_or(0);
        if self.result_limit < max_k {
            return Err(PanbenchError::config(format!(
                "result_limit ({}) must be >= the largest cutoff k ({max_k}), \
                 otherwise recall is under-estimated",
                self.result_limit
            )));
        }
        if self.batch_size == 0 {
            return Err(PanbenchError::config("batch_size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EvalConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.top_n_terms, 10);
        assert_eq!(config.k_values, vec![2, 4, 6, 8, 10]);
        assert_eq!(config.search_timeout, Duration::from_secs(100));
        assert_eq!(config.batch_size, 50);
    }

    #[test]
    fn test_builder_methods() {
        let config = EvalConfig::default()
            .with_index_name("corpus")
            .with_top_n_terms(20)
            .with_result_limit(40)
            .with_k_values(vec![5, 10, 20, 40])
            .with_search_timeout(Duration::from_secs(10))
            .with_threads(2);

        assert_eq!(config.index_name, "corpus");
        assert_eq!(config.top_n_terms, 20);
        assert_eq!(config.thread_count(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_result_limit_below_max_k_is_rejected() {
        let config = EvalConfig::default()
            .with_result_limit(5)
            .with_k_values(vec![2, 10]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let config = EvalConfig::default().with_top_n_terms(0);
        assert!(config.validate().is_err());
    }
}
