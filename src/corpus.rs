//! Corpus traversal.
//!
//! Query documents are plain-text files under a root directory, optionally
//! partitioned into subdirectories ("part1", "part2", ...). Discovery
//! returns paths only; document text is read lazily, one query at a time.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Discover all `.txt` query documents under `root`, sorted by path for a
/// stable processing order.
pub fn discover_query_documents(root: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        if entry.file_type().is_file()
            && entry.path().extension().and_then(|e| e.to_str()) == Some("txt")
        {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_discovers_txt_files_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("part1")).unwrap();
        fs::write(dir.path().join("part1").join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();

        let paths = discover_query_documents(dir.path()).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.extension().unwrap() == "txt"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(discover_query_documents(&dir.path().join("nope")).is_err());
    }
}
