use crate::error::{Error, Result};
use crate::index::InvertedIndex;
use std::fs::{self, create_dir_all, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File name used when the caller does not pick one.
pub const DEFAULT_INDEX_FILENAME: &str = "index_data.txt";

/// Outcome of a [`IndexFile::save`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The index was written to disk.
    Written,
    /// A file already exists at the target path and `force` was off;
    /// nothing was touched.
    AlreadyExists,
}

/// Location of an on-disk index.
///
/// The format is one line per term: the term, then each document path that
/// contains it, all space-separated. Terms appear in lexicographic order and
/// paths in first-indexed order, so the same index always serializes to the
/// same bytes.
#[derive(Debug, Clone)]
pub struct IndexFile {
    path: PathBuf,
}

impl IndexFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// An index file with the default name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_INDEX_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write `index` to this path.
    ///
    /// With `force` off an existing file is left untouched and
    /// [`SaveOutcome::AlreadyExists`] is returned; `create_new` makes the
    /// existence check race-free. Overwrites go through a sibling scratch
    /// file renamed into place, so a failed write leaves the previous index
    /// intact. Either way no partial index is left behind.
    pub fn save(&self, index: &InvertedIndex, force: bool) -> Result<SaveOutcome> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        if force {
            self.overwrite(index)?;
        } else {
            let opened = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&self.path);
            let file = match opened {
                Ok(f) => f,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    return Ok(SaveOutcome::AlreadyExists);
                }
                Err(e) => return Err(Error::io(&self.path, e)),
            };
            if let Err(e) = write_lines(file, index) {
                let _ = fs::remove_file(&self.path);
                return Err(Error::io(&self.path, e));
            }
        }

        tracing::debug!(
            path = %self.path.display(),
            num_terms = index.term_count(),
            "wrote index"
        );
        Ok(SaveOutcome::Written)
    }

    fn overwrite(&self, index: &InvertedIndex) -> Result<()> {
        let mut scratch = self.path.as_os_str().to_os_string();
        scratch.push(".tmp");
        let scratch = PathBuf::from(scratch);

        let file = File::create(&scratch).map_err(|e| Error::io(&scratch, e))?;
        if let Err(e) = write_lines(file, index) {
            let _ = fs::remove_file(&scratch);
            return Err(Error::io(&scratch, e));
        }
        fs::rename(&scratch, &self.path).map_err(|e| {
            let _ = fs::remove_file(&scratch);
            Error::io(&self.path, e)
        })
    }

    /// Read an index back from this path.
    pub fn load(&self) -> Result<InvertedIndex> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::IndexNotFound {
                    path: self.path.clone(),
                });
            }
            Err(e) => return Err(Error::io(&self.path, e)),
        };

        let mut index = InvertedIndex::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let lineno = lineno + 1;
            let line = line.map_err(|e| Error::io(&self.path, e))?;
            let (term, rest) = line
                .split_once(char::is_whitespace)
                .ok_or_else(|| self.corrupt(lineno, "expected a term followed by paths"))?;
            if term.is_empty() {
                return Err(self.corrupt(lineno, "empty term"));
            }
            let mut any_path = false;
            for path in rest.split_whitespace() {
                index.insert(term, path);
                any_path = true;
            }
            if !any_path {
                return Err(self.corrupt(lineno, "term with no paths"));
            }
        }
        tracing::debug!(
            path = %self.path.display(),
            num_terms = index.term_count(),
            "loaded index"
        );
        Ok(index)
    }

    fn corrupt(&self, line: usize, reason: &str) -> Error {
        Error::CorruptIndex {
            path: self.path.clone(),
            line,
            reason: reason.to_string(),
        }
    }
}

fn write_lines(file: File, index: &InvertedIndex) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    for (term, paths) in index.iter() {
        writeln!(out, "{} {}", term, paths.join(" "))?;
    }
    out.flush()
}
