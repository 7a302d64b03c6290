use search_core::tokenizer::{split_into_words, tokenize, word_spans};
use search_core::StopWords;

#[test]
fn it_splits_on_spaces_only() {
    let words: Vec<&str> = split_into_words("white cat,  in\tthe city ").collect();
    assert_eq!(words, vec!["white", "cat,", "in\tthe", "city"]);
}

#[test]
fn it_restarts_from_a_clone() {
    let words = split_into_words("a b c");
    let again = words.clone();
    assert_eq!(words.count(), 3);
    assert_eq!(again.collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(word_spans(" ab ").collect::<Vec<_>>(), vec![1..3]);
}

#[test]
fn it_filters_stopwords() {
    let stop = StopWords::parse("the and").unwrap();
    let toks = tokenize("The quick brown fox and the lazy dog", &stop).unwrap();
    let words: Vec<&str> = toks.into_iter().map(|(w, _)| w).collect();
    // matching is case sensitive
    assert!(words.contains(&"The"));
    assert!(!words.contains(&"the"));
    assert!(!words.contains(&"and"));
}
