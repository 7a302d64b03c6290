use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::{Result, SearchError};
use crate::stop_words::StopWords;

const SEPARATOR: u8 = b' ';

/// Byte ranges of the space-separated words of a text.
///
/// Only the ASCII space separates words; tabs and newlines stay inside the
/// word and are later rejected by [`is_valid_word`]. Runs of spaces never
/// produce empty words. Call [`word_spans`] again to restart.
#[derive(Debug, Clone)]
pub struct WordSpans<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Iterator for WordSpans<'a> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let bytes = self.bytes;
        while self.pos < bytes.len() && bytes[self.pos] == SEPARATOR {
            self.pos += 1;
        }
        if self.pos == bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && bytes[self.pos] != SEPARATOR {
            self.pos += 1;
        }
        Some(start..self.pos)
    }
}

impl FusedIterator for WordSpans<'_> {}

/// The words of a text as borrowed slices, see [`WordSpans`].
#[derive(Debug, Clone)]
pub struct Words<'a> {
    text: &'a str,
    spans: WordSpans<'a>,
}

impl<'a> Iterator for Words<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        // spans always end on the ASCII separator or the end of text
        self.spans.next().map(|span| &self.text[span])
    }
}

impl FusedIterator for Words<'_> {}

pub fn word_spans(text: &str) -> WordSpans<'_> {
    WordSpans { bytes: text.as_bytes(), pos: 0 }
}

pub fn split_into_words(text: &str) -> Words<'_> {
    Words { text, spans: word_spans(text) }
}

/// A word is valid when it has no character below the space (control codes).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Split `text` into (word, byte offset) pairs, dropping stop words.
///
/// Every word is validated before anything is returned, so a caller that
/// mutates state only after this succeeds never commits a partial document.
pub fn tokenize<'a>(text: &'a str, stop_words: &StopWords) -> Result<Vec<(&'a str, usize)>> {
    let mut tokens = Vec::new();
    for span in word_spans(text) {
        let word = &text[span.clone()];
        if !is_valid_word(word) {
            return Err(SearchError::invalid_token(word));
        }
        if stop_words.contains(word) {
            continue;
        }
        tokens.push((word, span.start));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_repeated_separators() {
        let words: Vec<_> = split_into_words("  white   cat ").collect();
        assert_eq!(words, vec!["white", "cat"]);
    }

    #[test]
    fn empty_and_blank_text_have_no_words() {
        assert_eq!(split_into_words("").count(), 0);
        assert_eq!(split_into_words("    ").count(), 0);
    }

    #[test]
    fn tokenize_reports_offsets() {
        let stop = StopWords::parse("in the").unwrap();
        let t = tokenize("cat in the city", &stop).unwrap();
        assert_eq!(t, vec![("cat", 0), ("city", 11)]);
    }

    #[test]
    fn control_characters_are_rejected() {
        assert!(!is_valid_word("ca\u{12}t"));
        assert!(is_valid_word("кот"));
        let err = tokenize("big ca\tt", &StopWords::default()).unwrap_err();
        assert_eq!(err, SearchError::invalid_token("ca\tt"));
    }
}
