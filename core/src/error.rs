//! Error types shared across the engine.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A file or directory could not be read or written. Undecodable
    /// document content surfaces here too, as `io::ErrorKind::InvalidData`.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No index file exists at the given path. Recoverable by rebuilding.
    #[error("index not found at {}", path.display())]
    IndexNotFound { path: PathBuf },

    /// An index line did not parse as `term path [path ...]`.
    #[error("corrupt index {} at line {line}: {reason}", path.display())]
    CorruptIndex {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
