//! # Panbench
//!
//! Retrieval-quality evaluation for plagiarism-detection corpora.
//!
//! Given a collection of suspicious query documents and a full-text index of
//! source documents, panbench builds search queries with two competing
//! term-selection strategies, issues them against a pluggable search backend,
//! and scores the retrieved results with Precision@k / Recall@k against
//! ground-truth relevance judgments.
//!
//! ## Features
//!
//! - Frequency-ranked query term selection, with and without stopword removal
//! - Synonym expansion from a JSON lexicon
//! - Backend-agnostic query execution with per-query timeouts
//! - Precision@k / Recall@k curves over configurable cutoff depths
//! - Batched corpus ingestion through the same backend contract

pub mod analysis;
pub mod backend;
pub mod cli;
pub mod corpus;
pub mod error;
pub mod eval;
pub mod expansion;
pub mod ground_truth;
pub mod pipeline;
pub mod report;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
