//! Search backend contract and query execution.
//!
//! The full-text index itself is an external collaborator. This module
//! pins down the two operations the pipeline needs from it — disjunctive
//! term queries and bulk document ingestion — behind the [`SearchBackend`]
//! trait, and layers the evaluation-side behavior (per-query timeouts, hit
//! deduplication, batched ingestion) on top of that contract.

pub mod executor;
pub mod ingest;
pub mod memory;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use self::executor::{QueryExecutor, QueryResult};
pub use self::ingest::{IngestStats, ingest_corpus};
pub use self::memory::MemoryBackend;

/// The indexed field queries match against.
pub const CONTENT_FIELD: &str = "content";

/// A source document submitted for indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// File name, the identity hits are reported under.
    pub filename: String,
    /// Full document text.
    pub content: String,
}

/// A ranked search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Source document file name.
    pub filename: String,
    /// Backend relevance score.
    pub score: f64,
}

/// A disjunctive ("match any term") query over a single field.
///
/// Ranking is delegated to the backend's own scoring; the pipeline only
/// cares that a document matching any term is a candidate hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisjunctiveQuery {
    /// Field the terms match against.
    pub field: String,
    /// Query terms, already expanded and truncated.
    pub terms: Vec<String>,
    /// Maximum number of hits requested from the backend.
    pub limit: usize,
}

impl DisjunctiveQuery {
    /// Build a disjunctive query over the content field.
    pub fn over_content(terms: Vec<String>, limit: usize) -> Self {
        DisjunctiveQuery {
            field: CONTENT_FIELD.to_string(),
            terms,
            limit,
        }
    }
}

/// The pluggable full-text search provider.
///
/// One backend serves a whole evaluation run and is shared across worker
/// threads, so implementations must tolerate concurrent query issuance.
pub trait SearchBackend: Send + Sync {
    /// Execute a disjunctive term query against `index`, returning ranked
    /// hits (highest score first). Fewer hits than `query.limit` is valid.
    fn search(&self, index: &str, query: &DisjunctiveQuery) -> Result<Vec<Hit>>;

    /// Index a batch of source documents into `index`.
    fn bulk_index(&self, index: &str, batch: &[SourceDocument]) -> Result<()>;
}
