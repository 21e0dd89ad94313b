//! Term selection and synonym expansion strategies.

use std::str::FromStr;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::stopwords::StopwordList;
use crate::analysis::tokenizer::AlnumTokenizer;
use crate::error::{PanbenchError, Result};
use crate::expansion::MAX_SYNONYMS_PER_TERM;
use crate::expansion::lexicon::SynonymLexicon;

/// Term-selection strategy.
///
/// Both strategies share the same pipeline (tokenize, rank by frequency,
/// expand with synonyms); the only difference is whether stopwords are
/// discarded before frequency counting. The numeric labels come from the
/// study the corpus was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// "Approach 4": rank the full vocabulary, stopwords included.
    NoFilter,
    /// "Approach 6": drop stopwords before frequency counting.
    StopwordFilter,
}

impl Strategy {
    /// Human-readable label used in reports and chart legends.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::NoFilter => "approach-4",
            Strategy::StopwordFilter => "approach-6",
        }
    }

}

impl FromStr for Strategy {
    type Err = PanbenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "4" | "approach-4" | "no-filter" => Ok(Strategy::NoFilter),
            "6" | "approach-6" | "stopword-filter" => Ok(Strategy::StopwordFilter),
            other => Err(PanbenchError::config(format!(
                "unknown strategy selector '{other}' (expected 4 or 6)"
            ))),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Produces a bounded, ranked, synonym-expanded query term set from raw
/// document text.
///
/// The expanded set keeps insertion order: selected base terms first (in
/// rank order), then synonym forms in per-term discovery order. Truncating
/// the set therefore always prefers vocabulary observed in the document
/// over dictionary expansions.
///
/// # Examples
///
/// ```
/// use panbench::expansion::{Strategy, SynonymLexicon, TermExpander};
///
/// let expander = TermExpander::new(Strategy::StopwordFilter, SynonymLexicon::new(), 3);
/// let terms = expander.expand("the cat sat on the mat with the cat");
/// assert_eq!(terms, vec!["cat", "sat", "mat"]);
/// ```
#[derive(Debug, Clone)]
pub struct TermExpander {
    strategy: Strategy,
    tokenizer: AlnumTokenizer,
    stopwords: StopwordList,
    lexicon: SynonymLexicon,
    top_n: usize,
}

impl TermExpander {
    /// Create an expander for the given strategy and synonym lexicon.
    ///
    /// `top_n` bounds the number of base terms selected by frequency rank.
    pub fn new(strategy: Strategy, lexicon: SynonymLexicon, top_n: usize) -> Self {
        TermExpander {
            strategy,
            tokenizer: AlnumTokenizer::new(),
            stopwords: StopwordList::new(),
            lexicon,
            top_n,
        }
    }

    /// Replace the default English stopword list.
    pub fn with_stopwords(mut self, stopwords: StopwordList) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// The strategy this expander runs.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Select the `top_n` most frequent terms of `text`, before synonym
    /// expansion.
    ///
    /// Ties are broken by first occurrence in the text. The result length is
    /// exactly `min(top_n, distinct token count)`.
    pub fn select_terms(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        let tokens = match self.strategy {
            Strategy::NoFilter => tokens,
            Strategy::StopwordFilter => self.stopwords.filter(tokens),
        };

        // Count frequencies while remembering each token's first position,
        // which is the tie-break key.
        let mut frequencies: AHashMap<String, (usize, usize)> = AHashMap::new();
        for (position, token) in tokens.into_iter().enumerate() {
            frequencies
                .entry(token)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
        }

        let mut ranked: Vec<(String, usize, usize)> = frequencies
            .into_iter()
            .map(|(term, (count, first))| (term, count, first))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(self.top_n);

        ranked.into_iter().map(|(term, _, _)| term).collect()
    }

    /// Expand `text` into the full query term set: ranked base terms plus up
    /// to [`MAX_SYNONYMS_PER_TERM`] synonym forms per base term.
    ///
    /// Synonyms already present in the set are skipped and do not count
    /// against the per-term cap. The result may exceed `top_n`; callers
    /// truncate before query submission.
    pub fn expand(&self, text: &str) -> Vec<String> {
        let selected = self.select_terms(text);

        let mut terms = selected.clone();
        let mut seen: AHashSet<&str> = selected.iter().map(String::as_str).collect();

        let mut expansions = Vec::new();
        for term in &selected {
            let mut added = 0;
            for synonym in self.lexicon.lookup(term) {
                if added >= MAX_SYNONYMS_PER_TERM {
                    break;
                }
                if !seen.insert(synonym.as_str()) {
                    continue;
                }
                expansions.push(synonym.clone());
                added += 1;
            }
        }

        terms.extend(expansions);
        terms
    }
}
