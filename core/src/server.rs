use std::collections::{BTreeMap, HashMap};

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::config::EngineConfig;
use crate::document::{compute_average_rating, Document, DocumentId, DocumentInfo, DocumentStatus};
use crate::error::{Result, SearchError};
use crate::index::{term_frequencies, DocumentIndex, WordFrequencies};
use crate::query::parse_query;
use crate::ranker;
use crate::stop_words::StopWords;
use crate::store::{DocumentStore, StoredText};
use crate::tokenizer::tokenize;

static NO_WORDS: WordFrequencies = BTreeMap::new();

/// How a call spreads its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    /// Fan out over the server's worker pool and join before returning.
    Parallel,
}

/// In-process TF-IDF search engine.
///
/// Reads take `&self` and may run from many threads at once. Ingestion and
/// removal take `&mut self`, so no read can observe a half-added or
/// half-removed document.
pub struct SearchServer {
    config: EngineConfig,
    stop_words: StopWords,
    store: DocumentStore,
    index: DocumentIndex,
    documents: HashMap<DocumentId, DocumentInfo>,
    texts: HashMap<DocumentId, StoredText>,
    document_ids: Vec<DocumentId>,
    pool: ThreadPool,
}

impl SearchServer {
    /// Server with default configuration and space-separated stop words.
    pub fn new(stop_words: &str) -> Result<Self> {
        Self::with_config(StopWords::parse(stop_words)?, EngineConfig::default())
    }

    pub fn with_config(stop_words: StopWords, config: EngineConfig) -> Result<Self> {
        let threads = config.worker_threads.unwrap_or_else(num_cpus::get).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("search-worker-{i}"))
            .build()
            .map_err(|e| SearchError::ThreadPool(e.to_string()))?;
        Ok(SearchServer {
            index: DocumentIndex::new(config.index_shards),
            config,
            stop_words,
            store: DocumentStore::new(),
            documents: HashMap::new(),
            texts: HashMap::new(),
            document_ids: Vec::new(),
            pool,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    pub fn add_document(
        &mut self,
        id: DocumentId,
        text: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if id < 0 {
            return Err(SearchError::InvalidArgument(format!("document id {id} is negative")));
        }
        if self.documents.contains_key(&id) {
            return Err(SearchError::InvalidArgument(format!("document id {id} is already in use")));
        }
        // validate before anything is stored
        let tokens = tokenize(text, &self.stop_words)?;

        let stored = self.store.store(text);
        let words = term_frequencies(&stored, &tokens);
        tracing::debug!(id, tokens = tokens.len(), words = words.len(), "adding document");
        self.index.insert(id, words);
        self.documents.insert(id, DocumentInfo { rating: compute_average_rating(ratings), status });
        self.texts.insert(id, stored);
        self.document_ids.push(id);
        Ok(())
    }

    /// Top documents with [`DocumentStatus::Active`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Active)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionPolicy::Sequential, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Top documents for which `predicate(id, status, rating)` holds, at most
    /// `max_result_document_count` of them.
    pub fn find_top_documents_with<F>(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        predicate: F,
    ) -> Result<Vec<Document>>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
    {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = match policy {
            ExecutionPolicy::Sequential => {
                ranker::find_all_documents(&self.index, &self.documents, &query, predicate)
            }
            ExecutionPolicy::Parallel => ranker::find_all_documents_par(
                &self.index,
                &self.documents,
                &query,
                predicate,
                &self.pool,
                self.config.accumulator_shards,
            ),
        };
        ranker::sort_by_relevance(&mut matched, self.config.relevance_epsilon);
        matched.truncate(self.config.max_result_document_count);
        Ok(matched)
    }

    /// Parallel form of [`find_top_documents_by_status`](Self::find_top_documents_by_status).
    pub fn find_top_documents_par(&self, raw_query: &str, status: DocumentStatus) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionPolicy::Parallel, raw_query, move |_, document_status, _| {
            document_status == status
        })
    }

    /// Plus-words of the query found in document `id`, sorted, with its
    /// status. A minus-word found in the document empties the list.
    pub fn match_document(&self, raw_query: &str, id: DocumentId) -> Result<(Vec<&str>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, id)
    }

    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        id: DocumentId,
    ) -> Result<(Vec<&str>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let info = self.documents.get(&id).ok_or(SearchError::NotFound(id))?;
        let words = self.index.forward().get(id).ok_or(SearchError::NotFound(id))?;
        let matched = match policy {
            ExecutionPolicy::Sequential => ranker::match_words(words, &query),
            ExecutionPolicy::Parallel => ranker::match_words_par(words, &query, &self.pool),
        };
        Ok((matched, info.status))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Live ids in insertion order.
    pub fn document_ids(&self) -> impl ExactSizeIterator<Item = DocumentId> + '_ {
        self.document_ids.iter().copied()
    }

    pub fn document(&self, id: DocumentId) -> Option<DocumentInfo> {
        self.documents.get(&id).copied()
    }

    /// Raw text of a live document.
    pub fn document_text(&self, id: DocumentId) -> Option<&str> {
        self.texts.get(&id).map(StoredText::as_str)
    }

    /// Word -> term frequency of document `id`; empty for an unknown id.
    pub fn word_frequencies(&self, id: DocumentId) -> &WordFrequencies {
        self.index.forward().get(id).unwrap_or(&NO_WORDS)
    }

    /// Number of texts held by the store, including removed documents.
    pub fn stored_text_count(&self) -> usize {
        self.store.len()
    }

    pub(crate) fn index(&self) -> &DocumentIndex {
        &self.index
    }

    /// Removes document `id` and every posting of it. Unknown ids are ignored.
    pub fn remove_document(&mut self, id: DocumentId) {
        self.remove_document_with(ExecutionPolicy::Sequential, id)
    }

    pub fn remove_document_with(&mut self, policy: ExecutionPolicy, id: DocumentId) {
        let removed = match policy {
            ExecutionPolicy::Sequential => self.index.remove(id),
            ExecutionPolicy::Parallel => self.index.remove_par(id, &self.pool),
        };
        if !removed {
            tracing::debug!(id, "remove of unknown document ignored");
            return;
        }
        self.documents.remove(&id);
        self.texts.remove(&id);
        self.document_ids.retain(|&live| live != id);
        tracing::debug!(id, ?policy, "removed document");
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocumentId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, DocumentId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> SearchServer {
        let config = EngineConfig { worker_threads: Some(2), ..EngineConfig::default() };
        SearchServer::with_config(StopWords::parse("in the").unwrap(), config).unwrap()
    }

    #[test]
    fn rejects_negative_and_duplicate_ids() {
        let mut s = server();
        assert!(matches!(
            s.add_document(-1, "cat", DocumentStatus::Active, &[]),
            Err(SearchError::InvalidArgument(_))
        ));
        s.add_document(1, "cat", DocumentStatus::Active, &[]).unwrap();
        assert!(matches!(
            s.add_document(1, "dog", DocumentStatus::Active, &[]),
            Err(SearchError::InvalidArgument(_))
        ));
        assert_eq!(s.document_count(), 1);
    }

    #[test]
    fn invalid_token_commits_nothing() {
        let mut s = server();
        let err = s.add_document(3, "good ba\u{2}d", DocumentStatus::Active, &[1]).unwrap_err();
        assert_eq!(err, SearchError::invalid_token("ba\u{2}d"));
        assert_eq!(s.document_count(), 0);
        assert_eq!(s.stored_text_count(), 0);
        assert_eq!(s.index().inverted().word_count(), 0);
        assert!(s.word_frequencies(3).is_empty());
    }

    #[test]
    fn stop_word_only_document_has_no_words() {
        let mut s = server();
        s.add_document(5, "in the", DocumentStatus::Active, &[4]).unwrap();
        assert_eq!(s.document_count(), 1);
        assert!(s.word_frequencies(5).is_empty());
        assert_eq!(s.match_document("in", 5).unwrap(), (vec![], DocumentStatus::Active));
    }

    #[test]
    fn bad_query_is_reported_before_unknown_id() {
        let s = server();
        assert!(matches!(s.match_document("--cat", 9), Err(SearchError::InvalidToken { .. })));
        assert_eq!(s.match_document("cat", 9), Err(SearchError::NotFound(9)));
    }

    #[test]
    fn remove_unknown_is_noop() {
        let mut s = server();
        s.add_document(1, "cat", DocumentStatus::Active, &[]).unwrap();
        s.remove_document(2);
        s.remove_document_with(ExecutionPolicy::Parallel, 2);
        assert_eq!(s.document_count(), 1);
    }

    #[test]
    fn document_text_is_kept_until_removal() {
        let mut s = server();
        s.add_document(1, "white cat", DocumentStatus::Banned, &[2, 4]).unwrap();
        assert_eq!(s.document_text(1), Some("white cat"));
        assert_eq!(s.document(1), Some(DocumentInfo { rating: 3, status: DocumentStatus::Banned }));
        s.remove_document(1);
        assert_eq!(s.document_text(1), None);
        assert_eq!(s.stored_text_count(), 1);
    }
}
