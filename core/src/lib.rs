//! Core engine for a small full-text search tool.
//!
//! Builds an inverted index over the `.txt` files beneath a directory,
//! persists it as a line-oriented text file, and answers bag-of-words
//! queries with term-overlap scores and short excerpts.

pub mod error;
pub mod index;
pub mod persist;
pub mod search;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{build, InvertedIndex};
pub use persist::{IndexFile, SaveOutcome, DEFAULT_INDEX_FILENAME};
pub use search::{search, SearchHit, SearchResults, SkippedDoc};
