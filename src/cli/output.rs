//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, PanbenchArgs};
use crate::error::Result;
use crate::expansion::Strategy;
use crate::report::EvaluationReport;

/// Print an evaluation report in the selected format.
pub fn output_report(report: &EvaluationReport, args: &PanbenchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", report.render_summary());
            if args.verbosity() > 0 {
                println!("{}", report.render_curves());
            }
            Ok(())
        }
        OutputFormat::Json => output_json(report, args),
    }
}

/// Expansion result payload for JSON output.
#[derive(Debug, Serialize)]
struct ExpansionOutput<'a> {
    strategy: &'a str,
    base_terms: &'a [String],
    expanded_terms: &'a [String],
}

/// Print the term expansion of a single document.
pub fn output_expansion(
    strategy: Strategy,
    base_terms: &[String],
    expanded_terms: &[String],
    args: &PanbenchArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("Strategy: {strategy}");
            println!("Selected terms ({}):", base_terms.len());
            for term in base_terms {
                println!("  {term}");
            }
            let synonyms: Vec<&String> = expanded_terms
                .iter()
                .filter(|&term| !base_terms.contains(term))
                .collect();
            if !synonyms.is_empty() {
                println!("Synonym expansions ({}):", synonyms.len());
                for term in synonyms {
                    println!("  {term}");
                }
            }
            Ok(())
        }
        OutputFormat::Json => output_json(
            &ExpansionOutput {
                strategy: strategy.label(),
                base_terms,
                expanded_terms,
            },
            args,
        ),
    }
}

/// Output any serializable result as JSON.
fn output_json<T: Serialize>(result: &T, args: &PanbenchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
