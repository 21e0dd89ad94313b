//! Alphanumeric word tokenizer.
//!
//! Splits text using Unicode word boundary rules (UAX #29), lowercases it,
//! and keeps only tokens made up entirely of alphanumeric characters. This
//! is the shared first step of both term-selection strategies: punctuation,
//! whitespace, and mixed symbol runs never become query terms.
//!
//! # Examples
//!
//! ```
//! use panbench::analysis::tokenizer::AlnumTokenizer;
//!
//! let tokenizer = AlnumTokenizer::new();
//! let tokens = tokenizer.tokenize("Hello, World! Chapter 42.");
//!
//! assert_eq!(tokens, vec!["hello", "world", "chapter", "42"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

/// A tokenizer that lowercases input and splits it on Unicode word
/// boundaries, retaining only fully alphanumeric tokens.
#[derive(Clone, Debug, Default)]
pub struct AlnumTokenizer;

impl AlnumTokenizer {
    /// Create a new alphanumeric tokenizer.
    pub fn new() -> Self {
        AlnumTokenizer
    }

    /// Tokenize `text` into lowercase alphanumeric tokens, in order of
    /// appearance. Tokens containing any non-alphanumeric character (e.g.
    /// "don't", "e-mail") are dropped rather than split further.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_word_bounds()
            .filter(|word| !word.is_empty() && word.chars().all(|c| c.is_alphanumeric()))
            .map(|word| word.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokenizer = AlnumTokenizer::new();
        let tokens = tokenizer.tokenize("The quick brown fox");
        assert_eq!(tokens, vec!["the", "quick", "brown", "fox"]);
    }

    #[test]
    fn test_tokenize_lowercases() {
        let tokenizer = AlnumTokenizer::new();
        let tokens = tokenizer.tokenize("RUST Rust rust");
        assert_eq!(tokens, vec!["rust", "rust", "rust"]);
    }

    #[test]
    fn test_tokenize_drops_punctuation() {
        let tokenizer = AlnumTokenizer::new();
        let tokens = tokenizer.tokenize("one, two; three!");
        assert_eq!(tokens, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_tokenize_keeps_numbers() {
        let tokenizer = AlnumTokenizer::new();
        let tokens = tokenizer.tokenize("chapter 42 section 7a");
        assert_eq!(tokens, vec!["chapter", "42", "section", "7a"]);
    }

    #[test]
    fn test_tokenize_unicode_words() {
        let tokenizer = AlnumTokenizer::new();
        let tokens = tokenizer.tokenize("café résumé");
        assert_eq!(tokens, vec!["café", "résumé"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        let tokenizer = AlnumTokenizer::new();
        assert!(tokenizer.tokenize("").is_empty());
        assert!(tokenizer.tokenize("  ...  ").is_empty());
    }
}
