use serde::Deserialize;

/// Construction parameters of a [`SearchServer`](crate::SearchServer).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on the length of every ranked result list.
    pub max_result_document_count: usize,
    /// Relevances closer than this are ranked by rating instead.
    pub relevance_epsilon: f64,
    /// Buckets of the relevance accumulator used by parallel ranking.
    pub accumulator_shards: usize,
    /// Buckets of the inverted index.
    pub index_shards: usize,
    /// Size of the worker pool; `None` means one thread per CPU.
    pub worker_threads: Option<usize>,
    /// Number of most recent requests a `RequestQueue` remembers.
    pub request_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_result_document_count: 5,
            relevance_epsilon: 1e-6,
            accumulator_shards: 10,
            index_shards: 64,
            worker_threads: None,
            request_window: 1440,
        }
    }
}
