//! Embeddable TF-IDF document search.
//!
//! Documents are split on spaces, stop words are dropped, and each remaining
//! word is indexed with its term frequency. Queries are ranked by summed
//! tf·idf over their plus-words; `-word` excludes documents containing it.

pub mod batch;
pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod paginator;
pub mod query;
pub mod ranker;
pub mod request_queue;
pub mod server;
pub mod sharded;
pub mod stop_words;
pub mod store;
pub mod timing;
pub mod tokenizer;

pub use config::EngineConfig;
pub use document::{Document, DocumentId, DocumentInfo, DocumentStatus};
pub use error::{Result, SearchError};
pub use server::{ExecutionPolicy, SearchServer};
pub use stop_words::StopWords;
