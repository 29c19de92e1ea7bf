//! Presentation layer for the `findex` binary: index building and loading
//! on behalf of the user, console and HTML rendering, and the interactive
//! query prompt.

use anyhow::{Context, Result};
use findex_core::tokenizer::tokenize_unique;
use findex_core::{build, search, Error, IndexFile, InvertedIndex, SaveOutcome, SearchResults};
use regex::RegexBuilder;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Resolve which index file a subcommand should use.
pub fn index_file_for(root: &Path, explicit: Option<PathBuf>) -> IndexFile {
    match explicit {
        Some(path) => IndexFile::new(path),
        None => IndexFile::in_dir(root),
    }
}

/// Build the index for `root` and persist it, returning a status line for
/// the user.
pub fn build_and_save(root: &Path, file: &IndexFile, force: bool) -> Result<String> {
    let exists_line = || {
        format!(
            "Index already exists at {}; pass --force to overwrite.",
            file.path().display()
        )
    };
    if !force && file.exists() {
        return Ok(exists_line());
    }
    if force && file.exists() && index_inside_root(file.path(), root) {
        // The old index lives inside the tree being walked and would be
        // picked up as a .txt document.
        fs::remove_file(file.path())
            .with_context(|| format!("removing old index {}", file.path().display()))?;
    }

    let index = build(root)?;
    match file.save(&index, force)? {
        SaveOutcome::Written => Ok("Index created successfully!".to_string()),
        SaveOutcome::AlreadyExists => Ok(exists_line()),
    }
}

/// Load the index, or build and persist one first when `build_missing`
/// allows it.
pub fn load_or_build(file: &IndexFile, root: &Path, build_missing: bool) -> Result<InvertedIndex> {
    match file.load() {
        Ok(index) => Ok(index),
        Err(Error::IndexNotFound { .. }) if build_missing => {
            tracing::info!(root = %root.display(), "no index on disk, building one");
            let index = build(root)?;
            file.save(&index, false)?;
            Ok(index)
        }
        Err(e @ Error::IndexNotFound { .. }) => {
            Err(e).context("no index found; run `findex index` first or pass --build-missing")
        }
        Err(e) => Err(e.into()),
    }
}

/// Cap how many hits get rendered.
pub fn apply_limit(mut results: SearchResults, limit: Option<usize>) -> SearchResults {
    if let Some(n) = limit {
        results.hits.truncate(n);
    }
    results
}

/// Plain-text rendering for the terminal.
pub fn render_console(results: &SearchResults) -> String {
    let mut out = String::new();
    if results.hits.is_empty() {
        out.push_str("No matches.\n");
    } else {
        out.push_str("Matching files found:\n");
        for (i, hit) in results.hits.iter().enumerate() {
            out.push_str(&format!(
                "\nMatch {}: {}\nPath: {}\n",
                i + 1,
                hit.excerpt,
                hit.path
            ));
        }
    }
    for skipped in &results.skipped {
        out.push_str(&format!("\nskipped {}: {}\n", skipped.path, skipped.error));
    }
    out
}

/// A standalone report page: one entry per hit with a `file://` link and the
/// matched terms wrapped in `<em>`.
pub fn render_html(results: &SearchResults, query: &str) -> String {
    let terms = tokenize_unique(query);
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>Search results: {}</title>\n",
        escape_html(query)
    ));
    out.push_str("<style>em { background: #ff0; font-style: normal; }</style>\n");
    out.push_str("</head>\n<body>\n");
    if results.hits.is_empty() {
        out.push_str("<p>No matches.</p>\n");
    } else {
        out.push_str(&format!("<h1>Matches for {}</h1>\n", escape_html(query)));
        out.push_str("<ol>\n");
        for hit in &results.hits {
            out.push_str(&format!(
                "<li><a href=\"{}\">{}</a> (score {})<br>{}</li>\n",
                escape_html(&file_url(&hit.path)),
                escape_html(&hit.path),
                hit.score,
                highlight_terms(&escape_html(&hit.excerpt), &terms),
            ));
        }
        out.push_str("</ol>\n");
    }
    for skipped in &results.skipped {
        out.push_str(&format!(
            "<p>skipped {}: {}</p>\n",
            escape_html(&skipped.path),
            escape_html(&skipped.error)
        ));
    }
    out.push_str("</body>\n</html>\n");
    out
}

/// Interactive query loop; ends on end-of-input.
pub fn repl(index: &InvertedIndex, limit: Option<usize>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut line = String::new();
    loop {
        write!(stdout, "Enter the search query: ")?;
        stdout.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let results = apply_limit(search(index, line.trim()), limit);
        write!(stdout, "{}", render_console(&results))?;
    }
    Ok(())
}

/// Containment check on canonical paths, so a root and an index path
/// spelled differently (relative vs absolute, `..` components) still
/// compare.
fn index_inside_root(index_path: &Path, root: &Path) -> bool {
    let canonical = |p: &Path| fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf());
    canonical(index_path).starts_with(canonical(root))
}

fn file_url(path: &str) -> String {
    let abs = fs::canonicalize(path).unwrap_or_else(|_| PathBuf::from(path));
    format!("file://{}", abs.display())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn highlight_terms(text: &str, terms: &[String]) -> String {
    if terms.is_empty() {
        return text.to_string();
    }
    // One combined pass over all terms: a term can never match inside the
    // markup inserted for another.
    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let pat = RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .expect("valid regex");
    pat.replace_all(text, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0]))
        .to_string()
}
