//! Command line argument parsing for the panbench CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Panbench - retrieval-quality evaluation for plagiarism corpora
#[derive(Parser, Debug, Clone)]
#[command(name = "panbench")]
#[command(about = "Evaluate retrieval quality over a plagiarism-detection corpus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct PanbenchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl PanbenchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable summary and charts
    Human,
    /// JSON for machine consumption
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Ingest the source corpus and run the full two-strategy evaluation
    Evaluate(EvaluateArgs),

    /// Show the expanded query terms for a single document
    Expand(ExpandArgs),
}

/// Arguments for running an evaluation
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Directory holding the source documents to index
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Directory holding the suspicious (query) documents
    #[arg(value_name = "SUSPICIOUS_DIR")]
    pub suspicious_dir: PathBuf,

    /// Directory holding the ground-truth metadata files
    #[arg(value_name = "METADATA_DIR")]
    pub metadata_dir: PathBuf,

    /// Backend index name
    #[arg(long, default_value = "index")]
    pub index_name: String,

    /// Number of frequency-ranked terms per query
    #[arg(short = 'n', long, default_value = "10")]
    pub top_n_terms: usize,

    /// Number of hits requested per query
    #[arg(long, default_value = "10")]
    pub result_limit: usize,

    /// Evaluation cutoffs (comma-separated, ascending)
    #[arg(short, long, value_delimiter = ',', default_value = "2,4,6,8,10")]
    pub k_values: Vec<usize>,

    /// Per-query search timeout in seconds
    #[arg(long, default_value = "100")]
    pub timeout_secs: u64,

    /// Global cap on ground-truth records
    #[arg(long, default_value = "64")]
    pub ground_truth_limit: usize,

    /// Documents per ingestion batch
    #[arg(long, default_value = "50")]
    pub batch_size: usize,

    /// Worker threads per strategy (default: CPU count)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Path to a JSON synonym lexicon
    #[arg(long, value_name = "LEXICON_FILE")]
    pub synonyms: Option<PathBuf>,
}

/// Arguments for inspecting term expansion
#[derive(Parser, Debug, Clone)]
pub struct ExpandArgs {
    /// Document to expand
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Strategy selector (4 or 6)
    #[arg(short, long, default_value = "6")]
    pub strategy: String,

    /// Number of frequency-ranked terms to select
    #[arg(short = 'n', long, default_value = "10")]
    pub top_n_terms: usize,

    /// Path to a JSON synonym lexicon
    #[arg(long, value_name = "LEXICON_FILE")]
    pub synonyms: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_evaluate_args_defaults() {
        let args =
            PanbenchArgs::parse_from(["panbench", "evaluate", "sources", "suspicious", "meta"]);
        match args.command {
            Command::Evaluate(eval) => {
                assert_eq!(eval.top_n_terms, 10);
                assert_eq!(eval.k_values, vec![2, 4, 6, 8, 10]);
                assert_eq!(eval.timeout_secs, 100);
                assert_eq!(eval.batch_size, 50);
                assert_eq!(eval.ground_truth_limit, 64);
            }
            _ => panic!("expected evaluate command"),
        }
    }

    #[test]
    fn test_k_values_are_comma_separated() {
        let args = PanbenchArgs::parse_from([
            "panbench", "evaluate", "s", "q", "m", "-k", "1,3,5",
        ]);
        match args.command {
            Command::Evaluate(eval) => assert_eq!(eval.k_values, vec![1, 3, 5]),
            _ => panic!("expected evaluate command"),
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = PanbenchArgs::parse_from(["panbench", "-vv", "expand", "doc.txt"]);
        assert_eq!(args.verbosity(), 2);

        let args = PanbenchArgs::parse_from(["panbench", "--quiet", "expand", "doc.txt"]);
        assert_eq!(args.verbosity(), 0);
    }
}
