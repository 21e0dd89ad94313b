//! Synonym lexicon for query term expansion.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PanbenchError, Result};

/// Synonym lexicon for term expansion.
///
/// Maps a word form to zero or more related word forms. Absence of an entry
/// is not an error: a word nobody has synonyms for simply contributes no
/// expansion terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynonymLexicon {
    synonyms: HashMap<String, Vec<String>>,
}

impl SynonymLexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self {
            synonyms: HashMap::new(),
        }
    }

    /// Load a lexicon from a JSON file.
    ///
    /// The JSON file should contain an array of synonym groups, where each
    /// group is an array of word forms that are synonyms of each other.
    ///
    /// Example format:
    /// ```json
    /// [
    ///   ["big", "large", "huge"],
    ///   ["copy", "duplicate", "reproduction"]
    /// ]
    /// ```
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PanbenchError::analysis(format!("Failed to read synonym lexicon '{path}': {e}"))
        })?;

        let groups: Vec<Vec<String>> = serde_json::from_str(&content).map_err(|e| {
            PanbenchError::analysis(format!("Failed to parse synonym lexicon '{path}': {e}"))
        })?;

        let mut lexicon = Self::new();
        for group in groups {
            if !group.is_empty() {
                lexicon.add_synonym_group(group);
            }
        }

        Ok(lexicon)
    }

    /// Look up the synonyms of a word form.
    ///
    /// Returns an empty slice when the lexicon has no entry for the word.
    pub fn lookup(&self, term: &str) -> &[String] {
        self.synonyms.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a group of mutually synonymous word forms.
    ///
    /// Every member of the group maps to all other members.
    pub fn add_synonym_group(&mut self, terms: Vec<String>) {
        for (i, term) in terms.iter().enumerate() {
            let mut synonyms = Vec::new();
            for (j, other_term) in terms.iter().enumerate() {
                if i != j {
                    synonyms.push(other_term.clone());
                }
            }
            self.synonyms.insert(term.clone(), synonyms);
        }
    }

    /// Number of word forms with at least one synonym.
    pub fn len(&self) -> usize {
        self.synonyms.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.synonyms.is_empty()
    }
}
