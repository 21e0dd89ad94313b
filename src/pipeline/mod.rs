//! Evaluation pipeline: per-strategy execution over the query corpus.

pub mod config;
pub mod metrics;
pub mod runner;

pub use self::config::EvalConfig;
pub use self::metrics::RunStats;
pub use self::runner::{ComparisonOutcome, StrategyOutcome, StrategyRunner, run_comparison};
