use crate::index::InvertedIndex;
use crate::tokenizer::{tokenize, tokenize_unique};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;

/// Characters of context kept on each side of a matched term.
const EXCERPT_CONTEXT: usize = 20;

/// One ranked match.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub path: String,
    /// Number of distinct query terms the document matched.
    pub score: usize,
    /// Windows around the first occurrence of each matched term, in
    /// query-term order. Empty when the file no longer contains the terms.
    pub excerpt: String,
}

/// A candidate document that could not be re-read at query time.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDoc {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    /// Matches ranked by score descending; ties keep first-seen order.
    pub hits: Vec<SearchHit>,
    pub skipped: Vec<SkippedDoc>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.skipped.is_empty()
    }
}

/// Run `query` against `index`, re-reading matched documents for excerpts.
///
/// The query goes through the same tokenizer as the documents did, with
/// duplicate terms collapsed, so a term repeated in the query counts once.
/// Documents that vanished since indexing are reported in
/// [`SearchResults::skipped`] instead of failing the whole query.
pub fn search(index: &InvertedIndex, query: &str) -> SearchResults {
    let terms = tokenize_unique(query);
    if terms.is_empty() {
        return SearchResults::default();
    }

    let mut scores: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for term in &terms {
        if let Some(paths) = index.lookup(term) {
            for path in paths {
                match scores.entry(path.as_str()) {
                    Entry::Occupied(mut e) => *e.get_mut() += 1,
                    Entry::Vacant(e) => {
                        e.insert(1);
                        order.push(path.as_str());
                    }
                }
            }
        }
    }

    let mut results = SearchResults::default();
    for path in order {
        let score = scores[path];
        match fs::read_to_string(path) {
            Ok(contents) => {
                // Excerpts come from the same normalized, stop-word-free
                // stream the index was built from.
                let text = tokenize(&contents).join(" ");
                results.hits.push(SearchHit {
                    path: path.to_string(),
                    score,
                    excerpt: build_excerpt(&text, &terms),
                });
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "skipping unreadable document");
                results.skipped.push(SkippedDoc {
                    path: path.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    results.hits.sort_by_key(|h| Reverse(h.score));
    results
}

/// Window around the first occurrence of each term found in `text`.
fn build_excerpt(text: &str, terms: &[String]) -> String {
    let mut excerpt = String::new();
    for term in terms {
        if let Some(start) = text.find(term.as_str()) {
            let from = back_up(text, start, EXCERPT_CONTEXT);
            let to = advance(text, start + term.len(), EXCERPT_CONTEXT);
            excerpt.push_str("... ");
            excerpt.push_str(&text[from..to]);
            excerpt.push_str(" ...");
        }
    }
    excerpt
}

/// Step back up to `chars` characters from byte offset `at`, staying on a
/// boundary.
fn back_up(text: &str, mut at: usize, chars: usize) -> usize {
    for _ in 0..chars {
        match text[..at].chars().next_back() {
            Some(c) => at -= c.len_utf8(),
            None => break,
        }
    }
    at
}

/// Step forward up to `chars` characters from byte offset `at`.
fn advance(text: &str, mut at: usize, chars: usize) -> usize {
    for _ in 0..chars {
        match text[at..].chars().next() {
            Some(c) => at += c.len_utf8(),
            None => break,
        }
    }
    at
}
