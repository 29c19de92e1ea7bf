use findex_cli::{
    apply_limit, build_and_save, index_file_for, load_or_build, render_console, render_html,
};
use findex_core::{search, DEFAULT_INDEX_FILENAME};
use std::fs;
use tempfile::tempdir;

fn write_docs(dir: &std::path::Path) {
    fs::write(dir.join("a.txt"), "the quick brown fox").unwrap();
    fs::write(dir.join("b.txt"), "quick quick fox jumps").unwrap();
}

#[test]
fn it_indexes_and_searches_end_to_end() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);

    let message = build_and_save(dir.path(), &file, false).unwrap();
    assert_eq!(message, "Index created successfully!");
    assert!(dir.path().join(DEFAULT_INDEX_FILENAME).exists());

    let index = load_or_build(&file, dir.path(), false).unwrap();
    let results = search(&index, "quick fox");
    assert_eq!(results.hits.len(), 2);

    let rendered = render_console(&results);
    assert!(rendered.starts_with("Matching files found:"));
    assert!(rendered.contains("Match 1:"));
    assert!(rendered.contains("a.txt"));
}

#[test]
fn it_leaves_an_existing_index_alone_without_force() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);
    build_and_save(dir.path(), &file, false).unwrap();
    let before = fs::read(file.path()).unwrap();

    fs::write(dir.path().join("c.txt"), "late arrival").unwrap();
    let message = build_and_save(dir.path(), &file, false).unwrap();
    assert!(message.contains("already exists"));
    assert_eq!(fs::read(file.path()).unwrap(), before);
}

#[test]
fn it_rebuilds_with_force_without_indexing_its_own_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "alpha beta").unwrap();
    let file = index_file_for(dir.path(), None);
    build_and_save(dir.path(), &file, false).unwrap();
    build_and_save(dir.path(), &file, true).unwrap();

    let index = file.load().unwrap();
    assert_eq!(index.document_count(), 1);
    assert!(index
        .iter()
        .all(|(_, paths)| paths.iter().all(|p| !p.contains("index_data"))));
}

#[test]
fn it_removes_a_stale_index_even_when_the_root_is_spelled_differently() {
    let dir = tempdir().unwrap();
    let docs = dir.path().join("docs");
    fs::create_dir_all(docs.join("sub")).unwrap();
    fs::write(docs.join("a.txt"), "alpha beta").unwrap();

    let file = index_file_for(&docs, Some(docs.join("index_data.txt")));
    build_and_save(&docs, &file, false).unwrap();

    // Same directory, reached through a `..` component.
    let spelled = docs.join("sub").join("..");
    build_and_save(&spelled, &file, true).unwrap();

    let index = file.load().unwrap();
    assert_eq!(index.document_count(), 1);
    assert!(index
        .iter()
        .all(|(_, paths)| paths.iter().all(|p| !p.contains("index_data"))));
}

#[test]
fn it_builds_on_demand_when_missing() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);

    let index = load_or_build(&file, dir.path(), true).unwrap();
    assert!(file.exists());
    assert!(!search(&index, "jumps").hits.is_empty());
}

#[test]
fn it_fails_without_an_index_unless_allowed_to_build() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);

    let err = load_or_build(&file, dir.path(), false).unwrap_err();
    assert!(err.to_string().contains("no index found"));
    assert!(!file.exists());
}

#[test]
fn it_renders_html_reports_with_links_and_highlighting() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);
    let index = load_or_build(&file, dir.path(), true).unwrap();

    let results = search(&index, "quick fox");
    let html = render_html(&results, "quick fox");
    assert!(html.contains("<em>quick</em>"));
    assert!(html.contains("<em>fox</em>"));
    assert!(html.contains("file://"));
    assert!(html.contains("(score 2)"));
}

#[test]
fn it_supports_a_custom_index_path_and_result_limit() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let custom = dir.path().join("indexes").join("main.idx");
    let file = index_file_for(dir.path(), Some(custom.clone()));
    build_and_save(dir.path(), &file, false).unwrap();
    assert!(custom.exists());

    let index = file.load().unwrap();
    let results = apply_limit(search(&index, "quick fox"), Some(1));
    assert_eq!(results.hits.len(), 1);
    let rendered = render_console(&results);
    assert!(rendered.contains("Match 1:"));
    assert!(!rendered.contains("Match 2:"));
}

#[test]
fn it_serializes_results_to_json() {
    let dir = tempdir().unwrap();
    write_docs(dir.path());
    let file = index_file_for(dir.path(), None);
    let index = load_or_build(&file, dir.path(), true).unwrap();

    let value = serde_json::to_value(search(&index, "quick")).unwrap();
    let hits = value["hits"].as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits[0]["path"].is_string());
    assert!(hits[0]["score"].is_u64());
    assert!(hits[0]["excerpt"].is_string());
    assert!(value["skipped"].as_array().unwrap().is_empty());
}
