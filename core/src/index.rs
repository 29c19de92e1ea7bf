use crate::error::{Error, Result};
use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Mapping from term to the documents containing it.
///
/// Posting lists hold one entry per document, in first-insertion order.
/// Terms iterate in lexicographic order, which keeps the on-disk
/// serialization deterministic for a given document set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    postings: BTreeMap<String, Vec<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to `term`'s posting list unless it is already there.
    pub fn insert(&mut self, term: impl Into<String>, path: &str) {
        let paths = self.postings.entry(term.into()).or_default();
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }

    /// Documents containing `term`, in first-insertion order.
    pub fn lookup(&self, term: &str) -> Option<&[String]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    /// Number of distinct documents across all posting lists.
    pub fn document_count(&self) -> usize {
        self.postings
            .values()
            .flatten()
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Terms with their posting lists, in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }
}

/// Build an index over every `.txt` file under `root`, recursively.
///
/// Traversal is file-name sorted so rebuilds over the same tree produce the
/// same index bytes. Any unreadable or undecodable file aborts the whole
/// build; nothing is persisted here.
pub fn build(root: impl AsRef<Path>) -> Result<InvertedIndex> {
    let root = root.as_ref();
    let mut index = InvertedIndex::new();
    let mut num_docs = 0usize;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            Error::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|s| s.to_str()) != Some("txt") {
            continue;
        }

        let path = entry.path().to_string_lossy().into_owned();
        let contents =
            fs::read_to_string(entry.path()).map_err(|e| Error::io(entry.path(), e))?;
        for term in tokenize(&contents) {
            index.insert(term, &path);
        }
        num_docs += 1;
    }

    tracing::info!(num_docs, num_terms = index.term_count(), "indexed documents");
    Ok(index)
}
