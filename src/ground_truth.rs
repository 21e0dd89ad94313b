//! Relevance ground-truth loading.
//!
//! Corpus metadata files describe which source documents are relevant to
//! each suspicious document. A metadata file holds either a single JSON
//! object or an array of objects; only objects whose `type` discriminant is
//! `"suspicious-document"` become [`RelevanceRecord`]s. Everything else —
//! unparsable files, entries of other types, entries with no discriminant —
//! is expected input and is skipped, never an error.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;

/// The `type` discriminant value accepted by the loader.
const SUSPICIOUS_DOCUMENT_TYPE: &str = "suspicious-document";

/// One ground-truth judgment: a suspicious document and the set of source
/// files relevant to it.
///
/// Multiple metadata entries may reference the same suspicious document;
/// the loader returns one record per accepted entry and leaves unioning to
/// the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevanceRecord {
    /// Logical identifier of the suspicious document (the metadata file name).
    pub suspicious_document_id: String,
    /// Source filenames judged relevant. Empty when the entry had none.
    pub relevant_source_files: HashSet<String>,
}

/// Raw metadata entry as it appears on disk.
#[derive(Debug, Deserialize)]
struct MetadataEntry {
    #[serde(rename = "type")]
    entry_type: Option<String>,
    #[serde(default)]
    src_file: Vec<String>,
}

/// A metadata file is either a single entry or an array of entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetadataFile {
    Many(Vec<MetadataEntry>),
    Single(MetadataEntry),
}

/// Why a metadata entry was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DiscardReason {
    /// The entry carries no `type` discriminant.
    MissingType,
    /// The entry's type is not `"suspicious-document"`.
    WrongType,
}

/// Validate one raw entry into a relevance record, or say why not.
fn validate(
    entry: MetadataEntry,
    document_id: &str,
) -> std::result::Result<RelevanceRecord, DiscardReason> {
    match entry.entry_type.as_deref() {
        None => Err(DiscardReason::MissingType),
        Some(SUSPICIOUS_DOCUMENT_TYPE) => Ok(RelevanceRecord {
            suspicious_document_id: document_id.to_string(),
            relevant_source_files: entry.src_file.into_iter().collect(),
        }),
        Some(_) => Err(DiscardReason::WrongType),
    }
}

/// Load up to `limit` relevance records from the `.json` metadata files in
/// `directory`.
///
/// The limit is a global cap across all files, and scanning stops as soon
/// as it is reached. File iteration order is filesystem-dependent and must
/// be treated as unspecified by callers.
pub fn load(directory: &Path, limit: usize) -> Result<Vec<RelevanceRecord>> {
    let mut records = Vec::new();

    for dir_entry in fs::read_dir(directory)? {
        let dir_entry = dir_entry?;
        let path = dir_entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let document_id = dir_entry.file_name().to_string_lossy().into_owned();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping unreadable metadata file");
                continue;
            }
        };

        let parsed: MetadataFile = match serde_json::from_str(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "skipping malformed metadata file");
                continue;
            }
        };

        let entries = match parsed {
            MetadataFile::Many(entries) => entries,
            MetadataFile::Single(entry) => vec![entry],
        };

        for entry in entries {
            match validate(entry, &document_id) {
                Ok(record) => {
                    records.push(record);
                    if records.len() >= limit {
                        return Ok(records);
                    }
                }
                Err(reason) => {
                    debug!(file = %document_id, ?reason, "discarded metadata entry");
                }
            }
        }
    }

    Ok(records)
}
