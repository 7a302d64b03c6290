use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::document::DocumentId;
use crate::sharded::ShardedMap;
use crate::store::{StoredText, Term};

/// Document id -> term frequency, for one word.
pub type Postings = BTreeMap<DocumentId, f64>;

/// Word -> term frequency, for one document.
pub type WordFrequencies = BTreeMap<Term, f64>;

/// Term frequency of every distinct word in `tokens`, which must be
/// (word, byte offset) pairs taken from `text`. Empty for no tokens.
pub fn term_frequencies(text: &StoredText, tokens: &[(&str, usize)]) -> WordFrequencies {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for &(word, offset) in tokens {
        counts.entry(word).or_insert((offset, 0)).1 += 1;
    }
    let total = tokens.len() as f64;
    counts
        .into_iter()
        .map(|(word, (offset, count))| (text.term(offset, word.len()), count as f64 / total))
        .collect()
}

/// Word -> postings, sharded by word hash so removals of different words
/// can run on different threads.
pub struct InvertedIndex {
    words: ShardedMap<Term, Postings>,
}

impl InvertedIndex {
    pub fn new(shard_count: usize) -> Self {
        InvertedIndex { words: ShardedMap::new(shard_count) }
    }

    pub fn insert(&self, word: Term, id: DocumentId, term_freq: f64) {
        self.words.access(word).insert(id, term_freq);
    }

    /// Runs `f` on the postings of `word` while its shard is read-locked.
    pub fn with_postings<R>(&self, word: &str, f: impl FnOnce(&Postings) -> R) -> Option<R> {
        self.words.read(word, f)
    }

    /// Number of live documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.with_postings(word, Postings::len).unwrap_or(0)
    }

    pub fn contains(&self, word: &str, id: DocumentId) -> bool {
        self.with_postings(word, |postings| postings.contains_key(&id)).unwrap_or(false)
    }

    /// Drops `id` from the postings of `word`, and `word` itself once no
    /// document is left under it.
    pub fn remove_posting(&self, word: &str, id: DocumentId) {
        self.words.retain_entry(word, |postings| {
            postings.remove(&id);
            !postings.is_empty()
        });
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn for_each(&self, f: impl FnMut(&Term, &Postings)) {
        self.words.for_each(f)
    }
}

/// Document id -> word frequencies; the mirror of [`InvertedIndex`].
#[derive(Debug, Default)]
pub struct ForwardIndex {
    documents: HashMap<DocumentId, WordFrequencies>,
}

impl ForwardIndex {
    pub fn get(&self, id: DocumentId) -> Option<&WordFrequencies> {
        self.documents.get(&id)
    }

    fn insert(&mut self, id: DocumentId, words: WordFrequencies) {
        self.documents.insert(id, words);
    }

    fn remove(&mut self, id: DocumentId) -> Option<WordFrequencies> {
        self.documents.remove(&id)
    }
}

/// Both views of the term-frequency facts, kept in agreement: `word` is in
/// the postings of `id` exactly when `id`'s word frequencies contain `word`.
pub struct DocumentIndex {
    inverted: InvertedIndex,
    forward: ForwardIndex,
}

impl DocumentIndex {
    pub fn new(shard_count: usize) -> Self {
        DocumentIndex { inverted: InvertedIndex::new(shard_count), forward: ForwardIndex::default() }
    }

    pub fn inverted(&self) -> &InvertedIndex {
        &self.inverted
    }

    pub fn forward(&self) -> &ForwardIndex {
        &self.forward
    }

    pub fn insert(&mut self, id: DocumentId, words: WordFrequencies) {
        for (word, &term_freq) in &words {
            self.inverted.insert(word.clone(), id, term_freq);
        }
        self.forward.insert(id, words);
    }

    /// Returns false if `id` was not indexed.
    pub fn remove(&mut self, id: DocumentId) -> bool {
        let Some(words) = self.forward.remove(id) else {
            return false;
        };
        for word in words.keys() {
            self.inverted.remove_posting(word, id);
        }
        true
    }

    /// Same as [`remove`](Self::remove) with the per-word deletions spread
    /// over `pool`. Words in different shards never contend.
    pub fn remove_par(&mut self, id: DocumentId, pool: &ThreadPool) -> bool {
        let Some(words) = self.forward.remove(id) else {
            return false;
        };
        let inverted = &self.inverted;
        pool.install(|| {
            words.par_iter().for_each(|(word, _)| inverted.remove_posting(word, id));
        });
        true
    }
}
