//! Error types, one enum per layer.
//!
//! Lower-layer errors are wrapped, never rewritten, on their way up to the
//! view-models, which turn them into display strings.

use thiserror::Error;

use crate::domain::todo::TodoId;

#[derive(Debug, Error)]
pub enum NetworkError {
    /// DNS failure, refused connection, reset, timeout.
    #[error("network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response from server (status {status})")]
    InvalidResponse { status: u16 },

    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    ClientSetup(reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Invalid feed URL configuration")]
    InvalidUrlConfiguration,

    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("to-do {0} not found")]
    NotFound(TodoId),

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("corrupt to-do record: {0}")]
    CorruptRecord(String),
}

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl TodoError {
    pub fn is_not_found(&self) -> bool { matches!(self, TodoError::Repository(RepositoryError::NotFound(_))) }
}
