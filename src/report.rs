//! Run reporting: aggregate statistics and strategy comparison curves.
//!
//! The report is the run's only output. It carries the per-strategy
//! throughput aggregates, every skip counter the pipeline accumulated (so
//! partial results are never silent), and the precision/recall curves for
//! both strategies. Rendering targets the console; the JSON form is for
//! machine consumption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::IngestStats;
use crate::eval::evaluator::{PrecisionRecallCurve, evaluate};
use crate::ground_truth::RelevanceRecord;
use crate::pipeline::runner::{ComparisonOutcome, StrategyOutcome};

/// Width of a full bar in the rendered comparison charts.
const CHART_WIDTH: usize = 40;

/// Aggregates for one strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyReport {
    /// Strategy label ("approach-4" / "approach-6").
    pub strategy: String,
    /// Query documents attempted.
    pub queries_total: u64,
    /// Query documents skipped as unreadable.
    pub documents_skipped: u64,
    /// Queries dropped after backend failure or timeout.
    pub queries_failed: u64,
    /// Queries that produced results.
    pub queries_completed: u64,
    /// Unique hits found across all completed queries.
    pub total_hits: u64,
    /// Mean term-expansion time per query, milliseconds.
    pub mean_preprocessing_ms: f64,
    /// Mean backend round-trip per completed query, milliseconds.
    pub mean_search_ms: f64,
    /// Precision/recall curve over the run's cutoffs.
    pub curve: PrecisionRecallCurve,
}

impl StrategyReport {
    fn build(outcome: &StrategyOutcome, ground_truth: &[RelevanceRecord], k_values: &[usize]) -> Self {
        let stats = &outcome.stats;
        StrategyReport {
            strategy: outcome.strategy.label().to_string(),
            queries_total: stats.queries_total,
            documents_skipped: stats.documents_skipped,
            queries_failed: stats.queries_failed,
            queries_completed: stats.queries_completed,
            total_hits: stats.total_hits,
            mean_preprocessing_ms: stats.mean_preprocessing_time().as_secs_f64() * 1000.0,
            mean_search_ms: stats.mean_search_time().as_secs_f64() * 1000.0,
            curve: evaluate(ground_truth, &outcome.results, k_values),
        }
    }
}

/// The complete output of one evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Evaluation cutoffs shared by both curves.
    pub k_values: Vec<usize>,
    /// Ground-truth records loaded.
    pub ground_truth_records: usize,
    /// Size of the global relevant-file set.
    pub relevant_files: usize,
    /// Ingestion counters, when the run ingested the source corpus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestStats>,
    /// Per-strategy aggregates, comparison order.
    pub strategies: Vec<StrategyReport>,
}

impl EvaluationReport {
    /// Assemble the report for a finished comparison run.
    pub fn build(
        ground_truth: &[RelevanceRecord],
        outcome: &ComparisonOutcome,
        k_values: &[usize],
        ingest: Option<IngestStats>,
    ) -> Self {
        let relevant_files = ground_truth
            .iter()
            .flat_map(|record| record.relevant_source_files.iter())
            .collect::<std::collections::HashSet<_>>()
            .len();

        EvaluationReport {
            generated_at: Utc::now(),
            k_values: k_values.to_vec(),
            ground_truth_records: ground_truth.len(),
            relevant_files,
            ingest,
            strategies: vec![
                StrategyReport::build(&outcome.no_filter, ground_truth, k_values),
                StrategyReport::build(&outcome.stopword_filter, ground_truth, k_values),
            ],
        }
    }

    /// Render the summary statistics block.
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Evaluation Summary:\n");
        out.push_str("═══════════════════\n");
        out.push_str(&format!(
            "Ground truth: {} records, {} distinct relevant files\n",
            self.ground_truth_records, self.relevant_files
        ));

        if let Some(ingest) = &self.ingest {
            out.push_str(&format!(
                "Ingestion: {} documents indexed, {} dropped in {} failed batches, {} unreadable\n",
                ingest.documents_indexed,
                ingest.documents_dropped,
                ingest.batches_failed,
                ingest.documents_skipped
            ));
            out.push_str(&format!(
                "Mean read time: {:.4} ms, mean index time: {:.4} ms per document\n",
                ingest.mean_read_time().as_secs_f64() * 1000.0,
                ingest.mean_index_time().as_secs_f64() * 1000.0
            ));
        }

        for strategy in &self.strategies {
            out.push('\n');
            out.push_str(&format!("Strategy {}:\n", strategy.strategy));
            out.push_str("────────────────────\n");
            out.push_str(&format!(
                "Queries: {} total, {} completed, {} failed, {} unreadable\n",
                strategy.queries_total,
                strategy.queries_completed,
                strategy.queries_failed,
                strategy.documents_skipped
            ));
            out.push_str(&format!("Documents found: {}\n", strategy.total_hits));
            out.push_str(&format!(
                "Mean preprocessing time: {:.4} ms\n",
                strategy.mean_preprocessing_ms
            ));
            out.push_str(&format!(
                "Mean search time: {:.4} ms\n",
                strategy.mean_search_ms
            ));
        }
        out
    }

    /// Render the precision and recall comparison charts.
    pub fn render_curves(&self) -> String {
        let mut out = String::new();
        out.push_str(&render_chart("Precision@k", &self.strategies, |s| {
            s.curve.precision.as_slice()
        }));
        out.push('\n');
        out.push_str(&render_chart("Recall@k", &self.strategies, |s| {
            s.curve.recall.as_slice()
        }));
        out
    }
}

/// Render one metric as a labeled bar chart, one bar per strategy per
/// cutoff.
fn render_chart<'a>(
    title: &str,
    strategies: &'a [StrategyReport],
    metric: impl Fn(&'a StrategyReport) -> &'a [f64],
) -> String {
    let mut out = String::new();
    out.push_str(&format!("{title}\n"));
    out.push_str(&format!("{}\n", "─".repeat(title.len())));

    let label_width = strategies
        .iter()
        .map(|s| s.strategy.len())
        .max()
        .unwrap_or(0);

    let k_values = strategies
        .first()
        .map(|s| s.curve.k_values.as_slice())
        .unwrap_or(&[]);

    for (i, k) in k_values.iter().enumerate() {
        for (row, strategy) in strategies.iter().enumerate() {
            let value = metric(strategy).get(i).copied().unwrap_or(0.0);
            let bar = "█".repeat((value.clamp(0.0, 1.0) * CHART_WIDTH as f64).round() as usize);
            let k_label = if row == 0 {
                format!("k={k:>3}")
            } else {
                " ".repeat(5)
            };
            out.push_str(&format!(
                "{k_label}  {:<label_width$}  {value:.3}  {bar}\n",
                strategy.strategy
            ));
        }
        out.push('\n');
    }
    out
}
