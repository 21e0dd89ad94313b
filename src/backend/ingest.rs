//! Batched corpus ingestion through the backend contract.
//!
//! Source documents are committed in fixed-size batches. A failed batch is
//! dropped and counted, never fatal: losing a batch skews evaluation
//! numbers, so the loss is surfaced in the run summary instead of aborting
//! the run.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::backend::{SearchBackend, SourceDocument};
use crate::error::Result;

/// Default number of documents committed per batch.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Counters and timings for one ingestion pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents successfully committed.
    pub documents_indexed: u64,
    /// Documents dropped because their batch failed to commit.
    pub documents_dropped: u64,
    /// Files skipped because they could not be read.
    pub documents_skipped: u64,
    /// Batches committed.
    pub batches_committed: u64,
    /// Batches dropped after a commit failure.
    pub batches_failed: u64,
    /// Total time spent reading files.
    pub read_time: Duration,
    /// Total time spent in backend commits.
    pub index_time: Duration,
}

impl IngestStats {
    /// Mean read time per successfully read document.
    pub fn mean_read_time(&self) -> Duration {
        let read = self.documents_indexed + self.documents_dropped;
        if read == 0 {
            Duration::ZERO
        } else {
            self.read_time / read as u32
        }
    }

    /// Mean commit time per indexed document.
    pub fn mean_index_time(&self) -> Duration {
        if self.documents_indexed == 0 {
            Duration::ZERO
        } else {
            self.index_time / self.documents_indexed as u32
        }
    }
}

/// Index every `.txt` file under `corpus_dir` into `index`, committing in
/// batches of `batch_size`.
///
/// Unreadable files and failed batches are logged, counted, and skipped;
/// only an unwalkable corpus root is an error.
pub fn ingest_corpus(
    backend: &dyn SearchBackend,
    index: &str,
    corpus_dir: &Path,
    batch_size: usize,
) -> Result<IngestStats> {
    let mut stats = IngestStats::default();
    let mut batch: Vec<SourceDocument> = Vec::with_capacity(batch_size);

    for entry in WalkDir::new(corpus_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if !entry.file_type().is_file()
            || entry.path().extension().and_then(|e| e.to_str()) != Some("txt")
        {
            continue;
        }

        let read_start = Instant::now();
        let content = match std::fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "skipping unreadable source document");
                stats.documents_skipped += 1;
                continue;
            }
        };
        stats.read_time += read_start.elapsed();

        batch.push(SourceDocument {
            filename: entry.file_name().to_string_lossy().into_owned(),
            content,
        });

        if batch.len() >= batch_size {
            commit_batch(backend, index, &mut batch, &mut stats);
        }
    }

    if !batch.is_empty() {
        commit_batch(backend, index, &mut batch, &mut stats);
    }

    info!(
        indexed = stats.documents_indexed,
        dropped = stats.documents_dropped,
        skipped = stats.documents_skipped,
        "corpus ingestion finished"
    );
    Ok(stats)
}

fn commit_batch(
    backend: &dyn SearchBackend,
    index: &str,
    batch: &mut Vec<SourceDocument>,
    stats: &mut IngestStats,
) {
    let index_start = Instant::now();
    match backend.bulk_index(index, batch) {
        Ok(()) => {
            stats.index_time += index_start.elapsed();
            stats.batches_committed += 1;
            stats.documents_indexed += batch.len() as u64;
        }
        Err(e) => {
            warn!(size = batch.len(), error = %e, "dropping failed ingestion batch");
            stats.batches_failed += 1;
            stats.documents_dropped += batch.len() as u64;
        }
    }
    batch.clear();
}
