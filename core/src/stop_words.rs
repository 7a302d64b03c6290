use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words};

/// Words that are neither indexed nor queried. Fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    /// Stop words given as one space-separated string.
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_words(split_into_words(text))
    }

    /// Empty strings are skipped, duplicates collapse.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = BTreeSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::InvalidArgument(format!("stop word {word:?} is invalid")));
            }
            set.insert(word.to_string());
        }
        Ok(StopWords { words: set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_form_skips_empty_and_duplicates() {
        let stop = StopWords::from_words(["and", "", "in", "and"]).unwrap();
        assert_eq!(stop.iter().collect::<Vec<_>>(), vec!["and", "in"]);
    }

    #[test]
    fn invalid_stop_word_fails() {
        let err = StopWords::parse("in th\u{1}e").unwrap_err();
        assert!(matches!(err, SearchError::InvalidArgument(_)));
    }
}
