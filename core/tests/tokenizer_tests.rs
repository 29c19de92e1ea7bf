use findex_core::tokenizer::{tokenize, tokenize_unique};

#[test]
fn it_normalizes_case_and_punctuation() {
    let words = tokenize("The CAFE's menu, twice-daily!");
    assert_eq!(words, vec!["cafe", "s", "menu", "twice", "daily"]);
}

#[test]
fn it_filters_stopwords() {
    let words = tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words, vec!["quick", "brown", "fox", "lazy", "dog"]);
}

#[test]
fn it_deduplicates_query_terms() {
    let words = tokenize_unique("quick QUICK fox quick");
    assert_eq!(words, vec!["quick", "fox"]);
}
