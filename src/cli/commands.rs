//! Command execution logic for the panbench CLI.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::backend::{MemoryBackend, ingest_corpus};
use crate::cli::args::{Command, EvaluateArgs, ExpandArgs, PanbenchArgs};
use crate::cli::output;
use crate::corpus::discover_query_documents;
use crate::error::Result;
use crate::expansion::{Strategy, SynonymLexicon, TermExpander};
use crate::ground_truth;
use crate::pipeline::{EvalConfig, run_comparison};
use crate::report::EvaluationReport;

/// Execute the parsed CLI command.
pub fn execute_command(args: PanbenchArgs) -> Result<()> {
    match args.command.clone() {
        Command::Evaluate(eval_args) => cmd_evaluate(&args, eval_args),
        Command::Expand(expand_args) => cmd_expand(&args, expand_args),
    }
}

fn load_lexicon(path: Option<&std::path::Path>) -> Result<SynonymLexicon> {
    match path {
        Some(path) => SynonymLexicon::load_from_file(&path.to_string_lossy()),
        None => Ok(SynonymLexicon::new()),
    }
}

/// Ingest the source corpus, run both strategies, evaluate, report.
fn cmd_evaluate(args: &PanbenchArgs, eval_args: EvaluateArgs) -> Result<()> {
    let config = EvalConfig::default()
        .with_index_name(eval_args.index_name.clone())
        .with_top_n_terms(eval_args.top_n_terms)
        .with_result_limit(eval_args.result_limit)
        .with_k_values(eval_args.k_values.clone())
        .with_search_timeout(Duration::from_secs(eval_args.timeout_secs))
        .with_ground_truth_limit(eval_args.ground_truth_limit)
        .with_batch_size(eval_args.batch_size);
    let config = match eval_args.threads {
        Some(threads) => config.with_threads(threads),
        None => config,
    };
    config.validate()?;

    let lexicon = load_lexicon(eval_args.synonyms.as_deref())?;
    let backend = Arc::new(MemoryBackend::new());

    info!(corpus = %eval_args.source_dir.display(), "ingesting source corpus");
    let ingest_stats = ingest_corpus(
        backend.as_ref(),
        &config.index_name,
        &eval_args.source_dir,
        config.batch_size,
    )?;

    let ground_truth =
        ground_truth::load(&eval_args.metadata_dir, config.ground_truth_limit)?;
    let query_paths = discover_query_documents(&eval_args.suspicious_dir)?;
    info!(
        queries = query_paths.len(),
        ground_truth = ground_truth.len(),
        "starting strategy comparison"
    );

    let outcome = run_comparison(backend, lexicon, &config, &query_paths)?;
    let report =
        EvaluationReport::build(&ground_truth, &outcome, &config.k_values, Some(ingest_stats));

    output::output_report(&report, args)
}

/// Expand one document and print its query term set.
fn cmd_expand(args: &PanbenchArgs, expand_args: ExpandArgs) -> Result<()> {
    let strategy = Strategy::from_str(&expand_args.strategy)?;
    let lexicon = load_lexicon(expand_args.synonyms.as_deref())?;

    let text = std::fs::read_to_string(&expand_args.document)?;
    let expander = TermExpander::new(strategy, lexicon, expand_args.top_n_terms);

    let base_terms = expander.select_terms(&text);
    let mut expanded = expander.expand(&text);
    expanded.truncate(expand_args.top_n_terms);

    output::output_expansion(strategy, &base_terms, &expanded, args)
}
