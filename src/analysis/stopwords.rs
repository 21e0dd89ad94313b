//! English stopword list and filtering.
//!
//! The stopword-filtered term-selection strategy drops these words before
//! frequency counting. The default list covers common English articles,
//! pronouns, prepositions, auxiliaries, and bare auxiliary stems
//! ("don", "ve", "ll", ...).
//!
//! # Examples
//!
//! ```
//! use panbench::analysis::stopwords::StopwordList;
//!
//! let stopwords = StopwordList::new();
//! assert!(stopwords.contains("the"));
//! assert!(!stopwords.contains("plagiarism"));
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

/// Default English stop words list.
const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "couldn", "didn",
    "doesn", "hadn", "hasn", "haven", "isn", "ma", "mightn", "mustn", "needn", "shan",
    "shouldn", "wasn", "weren", "won", "wouldn",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A fixed set of words to discard before frequency counting.
///
/// # Examples
///
/// ```
/// use panbench::analysis::stopwords::StopwordList;
///
/// let stopwords = StopwordList::from_words(vec!["foo", "bar"]);
/// let kept = stopwords.filter(vec!["foo".to_string(), "baz".to_string()]);
/// assert_eq!(kept, vec!["baz"]);
/// ```
#[derive(Clone, Debug)]
pub struct StopwordList {
    words: Arc<HashSet<String>>,
}

impl StopwordList {
    /// Create a stopword list with the default English stop words.
    pub fn new() -> Self {
        StopwordList {
            words: Arc::new(DEFAULT_ENGLISH_STOP_WORDS_SET.clone()),
        }
    }

    /// Create a stopword list from custom words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopwordList {
            words: Arc::new(words.into_iter().map(|s| s.into()).collect()),
        }
    }

    /// Check if a word is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Remove stop words from a token list, preserving order.
    pub fn filter(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|token| !self.contains(token))
            .collect()
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordList {
    fn default() -> Self {
        Self::new()
    }
}
