//! TF-IDF ranking and matching over a [`DocumentIndex`].

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use rayon::ThreadPool;

use crate::document::{Document, DocumentId, DocumentInfo, DocumentStatus};
use crate::index::{DocumentIndex, WordFrequencies};
use crate::query::ParsedQuery;
use crate::sharded::ShardedMap;

/// ln(document count / documents containing the word).
pub fn inverse_document_frequency(document_count: usize, document_frequency: usize) -> f64 {
    (document_count as f64 / document_frequency as f64).ln()
}

pub(crate) fn find_all_documents<F>(
    index: &DocumentIndex,
    documents: &HashMap<DocumentId, DocumentInfo>,
    query: &ParsedQuery<'_>,
    predicate: F,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool,
{
    let mut document_to_relevance: BTreeMap<DocumentId, f64> = BTreeMap::new();
    for word in &query.plus_words {
        index.inverted().with_postings(word, |postings| {
            let idf = inverse_document_frequency(documents.len(), postings.len());
            for (&id, &term_freq) in postings {
                let Some(info) = documents.get(&id) else { continue };
                if predicate(id, info.status, info.rating) {
                    *document_to_relevance.entry(id).or_default() += term_freq * idf;
                }
            }
        });
    }
    for word in &query.minus_words {
        index.inverted().with_postings(word, |postings| {
            for id in postings.keys() {
                document_to_relevance.remove(id);
            }
        });
    }
    collect_documents(document_to_relevance, documents)
}

/// Parallel counterpart of [`find_all_documents`]: plus-words, then
/// minus-words, are spread over `pool`, accumulating into a sharded map.
pub(crate) fn find_all_documents_par<F>(
    index: &DocumentIndex,
    documents: &HashMap<DocumentId, DocumentInfo>,
    query: &ParsedQuery<'_>,
    predicate: F,
    pool: &ThreadPool,
    accumulator_shards: usize,
) -> Vec<Document>
where
    F: Fn(DocumentId, DocumentStatus, i32) -> bool + Sync,
{
    let document_to_relevance: ShardedMap<DocumentId, f64> = ShardedMap::new(accumulator_shards);
    pool.install(|| {
        query.plus_words.par_iter().for_each(|word| {
            index.inverted().with_postings(word, |postings| {
                let idf = inverse_document_frequency(documents.len(), postings.len());
                for (&id, &term_freq) in postings {
                    let Some(info) = documents.get(&id) else { continue };
                    if predicate(id, info.status, info.rating) {
                        *document_to_relevance.access(id) += term_freq * idf;
                    }
                }
            });
        });
        query.minus_words.par_iter().for_each(|word| {
            index.inverted().with_postings(word, |postings| {
                for id in postings.keys() {
                    document_to_relevance.remove(id);
                }
            });
        });
    });
    collect_documents(document_to_relevance.into_ordinary_map(), documents)
}

fn collect_documents(
    document_to_relevance: BTreeMap<DocumentId, f64>,
    documents: &HashMap<DocumentId, DocumentInfo>,
) -> Vec<Document> {
    document_to_relevance
        .into_iter()
        .filter_map(|(id, relevance)| documents.get(&id).map(|info| Document::new(id, relevance, info.rating)))
        .collect()
}

/// Orders by relevance, highest first. A document moves ahead of its
/// neighbour only when the two are within `epsilon` and it has the higher
/// rating, so it never passes one that beats it by `epsilon` or more.
pub fn sort_by_relevance(documents: &mut [Document], epsilon: f64) {
    documents.sort_by(|lhs, rhs| rhs.relevance.total_cmp(&lhs.relevance).then(lhs.id.cmp(&rhs.id)));
    for i in 1..documents.len() {
        let mut j = i;
        while j > 0
            && (documents[j - 1].relevance - documents[j].relevance).abs() < epsilon
            && documents[j].rating > documents[j - 1].rating
        {
            documents.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Plus-words of `query` found in `words`, sorted; empty when any
/// minus-word is found.
pub(crate) fn match_words<'w>(words: &'w WordFrequencies, query: &ParsedQuery<'_>) -> Vec<&'w str> {
    if query.minus_words.iter().any(|word| words.contains_key(*word)) {
        return Vec::new();
    }
    query
        .plus_words
        .iter()
        .filter_map(|word| words.get_key_value(*word).map(|(term, _)| term.as_str()))
        .collect()
}

pub(crate) fn match_words_par<'w>(
    words: &'w WordFrequencies,
    query: &ParsedQuery<'_>,
    pool: &ThreadPool,
) -> Vec<&'w str> {
    pool.install(|| {
        if query.minus_words.par_iter().any(|word| words.contains_key(*word)) {
            return Vec::new();
        }
        let mut matched: Vec<&'w str> = query
            .plus_words
            .par_iter()
            .filter_map(|word| words.get_key_value(*word).map(|(term, _)| term.as_str()))
            .collect();
        matched.sort_unstable();
        matched.dedup();
        matched
    })
}
