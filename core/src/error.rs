use thiserror::Error;

use crate::document::DocumentId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Negative or already-live document id, bad stop words, zero page size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A token with a control character, or a malformed minus-word.
    #[error("word {token:?} is invalid")]
    InvalidToken { token: String },

    #[error("document {0} not found")]
    NotFound(DocumentId),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl SearchError {
    pub(crate) fn invalid_token(token: impl Into<String>) -> Self {
        SearchError::InvalidToken { token: token.into() }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
