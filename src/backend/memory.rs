//! In-memory reference backend.
//!
//! A deliberately simple `SearchBackend` implementation used by tests and
//! the single-process demo path: documents are tokenized at ingest time and
//! queries are scored by summed term frequency over a linear scan. It is
//! not an index and makes no ranking-quality claims; it exists to exercise
//! the pipeline end to end without an external search service.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::analysis::tokenizer::AlnumTokenizer;
use crate::backend::{DisjunctiveQuery, Hit, SearchBackend, SourceDocument};
use crate::error::{PanbenchError, Result};

#[derive(Debug)]
struct IndexedDocument {
    filename: String,
    term_counts: AHashMap<String, u32>,
}

/// An in-process backend scoring documents by summed term frequency.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tokenizer: AlnumTokenizer,
    indices: RwLock<AHashMap<String, Vec<IndexedDocument>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in `index`.
    pub fn doc_count(&self, index: &str) -> usize {
        self.indices.read().get(index).map_or(0, Vec::len)
    }
}

impl SearchBackend for MemoryBackend {
    fn search(&self, index: &str, query: &DisjunctiveQuery) -> Result<Vec<Hit>> {
        let indices = self.indices.read();
        let documents = indices
            .get(index)
            .ok_or_else(|| PanbenchError::backend(format!("unknown index '{index}'")))?;

        let mut scored: Vec<Hit> = documents
            .iter()
            .filter_map(|doc| {
                let score: f64 = query
                    .terms
                    .iter()
                    .map(|term| *doc.term_counts.get(term).unwrap_or(&0) as f64)
                    .sum();
                (score > 0.0).then(|| Hit {
                    filename: doc.filename.clone(),
                    score,
                })
            })
            .collect();

        // Stable sort keeps ingestion order among equal scores.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(query.limit);
        Ok(scored)
    }

    fn bulk_index(&self, index: &str, batch: &[SourceDocument]) -> Result<()> {
        let mut indexed: Vec<IndexedDocument> = batch
            .iter()
            .map(|doc| {
                let mut term_counts = AHashMap::new();
                for token in self.tokenizer.tokenize(&doc.content) {
                    *term_counts.entry(token).or_insert(0) += 1;
                }
                IndexedDocument {
                    filename: doc.filename.clone(),
                    term_counts,
                }
            })
            .collect();

        self.indices
            .write()
            .entry(index.to_string())
            .or_default()
            .append(&mut indexed);
        Ok(())
    }
}
