use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Handle to a document text owned by a [`DocumentStore`].
///
/// The text never moves once stored: the store only appends handles, and a
/// handle points at the same heap allocation for its whole life.
#[derive(Debug, Clone)]
pub struct StoredText(Arc<str>);

impl StoredText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// View of `len` bytes at `start`; both ends must be char boundaries.
    pub(crate) fn term(&self, start: usize, len: usize) -> Term {
        Term { source: Arc::clone(&self.0), start, end: start + len }
    }
}

/// A word viewed in place inside a stored document text.
///
/// Hashing, equality and ordering are those of the word itself, so maps keyed
/// by `Term` can be queried with a plain `&str`.
#[derive(Clone)]
pub struct Term {
    source: Arc<str>,
    start: usize,
    end: usize,
}

impl Term {
    pub fn as_str(&self) -> &str {
        &self.source[self.start..self.end]
    }
}

impl Deref for Term {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Term {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Term {}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Append-only owner of every ingested document text.
///
/// There is no per-document delete: text of a removed document stays here,
/// which keeps every [`Term`] handed out by the store valid.
#[derive(Debug, Default)]
pub struct DocumentStore {
    texts: Vec<StoredText>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, text: &str) -> StoredText {
        let stored = StoredText(Arc::from(text));
        self.texts.push(stored.clone());
        stored
    }

    /// Number of texts ever stored, removed documents included.
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn terms_survive_store_growth() {
        let mut store = DocumentStore::new();
        let first = store.store("white cat");
        let cat = first.term(6, 3);
        for i in 0..1000 {
            store.store(&format!("filler text {i}"));
        }
        assert_eq!(cat.as_str(), "cat");
        assert_eq!(store.len(), 1001);
    }

    #[test]
    fn term_keys_are_found_by_str() {
        let mut store = DocumentStore::new();
        let text = store.store("black cat");
        let mut map = HashMap::new();
        map.insert(text.term(0, 5), 1);
        assert_eq!(map.get("black"), Some(&1));
        assert_eq!(map.get("cat"), None);
    }
}
