use std::collections::BTreeSet;

use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;
use crate::tokenizer::{is_valid_word, split_into_words};

/// A parsed query. Both sets are deduplicated, sorted, and free of stop words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery<'q> {
    pub plus_words: BTreeSet<&'q str>,
    pub minus_words: BTreeSet<&'q str>,
}

struct QueryWord<'q> {
    data: &'q str,
    is_minus: bool,
}

fn parse_query_word(text: &str) -> Result<QueryWord<'_>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::invalid_token(text));
    }
    Ok(QueryWord { data, is_minus })
}

/// Parses `text` into plus- and minus-words.
///
/// `-word` excludes documents containing `word`. A lone `-`, a `--` prefix,
/// or a control character fails with [`SearchError::InvalidToken`].
pub fn parse_query<'q>(text: &'q str, stop_words: &StopWords) -> Result<ParsedQuery<'q>> {
    let mut query = ParsedQuery::default();
    for token in split_into_words(text) {
        let word = parse_query_word(token)?;
        if stop_words.contains(word.data) {
            continue;
        }
        if word.is_minus {
            query.minus_words.insert(word.data);
        } else {
            query.plus_words.insert(word.data);
        }
    }
    tracing::trace!(plus = query.plus_words.len(), minus = query.minus_words.len(), "parsed query");
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop() -> StopWords {
        StopWords::parse("in the").unwrap()
    }

    #[test]
    fn splits_plus_and_minus_words() {
        let q = parse_query("cat -big cat city -big", &stop()).unwrap();
        assert_eq!(q.plus_words.into_iter().collect::<Vec<_>>(), vec!["cat", "city"]);
        assert_eq!(q.minus_words.into_iter().collect::<Vec<_>>(), vec!["big"]);
    }

    #[test]
    fn stop_words_drop_from_both_sets() {
        let q = parse_query("in -the cat", &stop()).unwrap();
        assert!(!q.plus_words.contains("in"));
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn malformed_minus_words_fail() {
        for bad in ["-", "--cat", "cat -", "dog --"] {
            let err = parse_query(bad, &stop()).unwrap_err();
            assert!(matches!(err, SearchError::InvalidToken { .. }), "{bad}");
        }
        assert!(parse_query("-ca\u{7}t", &stop()).is_err());
    }

    #[test]
    fn inner_minus_is_part_of_the_word() {
        let q = parse_query("well-known", &stop()).unwrap();
        assert!(q.plus_words.contains("well-known"));
    }
}
