//! Text analysis for query construction.
//!
//! This module provides the pieces the term-expansion strategies are built
//! from: a Unicode-aware alphanumeric tokenizer and the default English
//! stopword list.

pub mod stopwords;
pub mod tokenizer;

pub use self::stopwords::{DEFAULT_ENGLISH_STOP_WORDS_SET, StopwordList};
pub use self::tokenizer::AlnumTokenizer;
