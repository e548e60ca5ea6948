use async_trait::async_trait;
use url::Url;

use super::character::FeedResult;
use super::todo::{Todo, TodoId};
use crate::error::{NetworkError, RepositoryError};

#[async_trait]
pub trait FeedRepository: Send + Sync + 'static {
    async fn fetch_feed(&self, url: &Url) -> Result<FeedResult, NetworkError>;
}

/// Durable or in-memory storage for to-do items.
///
/// Implementations share one contract: `fetch_all` is ordered by
/// `created_at` descending, and `update`, `delete` and `toggle_completion`
/// fail with [`RepositoryError::NotFound`] for an unknown id. No title
/// validation happens at this layer.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> Result<(), RepositoryError>;
    async fn fetch_all(&self) -> Result<Vec<Todo>, RepositoryError>;
    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, RepositoryError>;
    async fn update(&self, todo: &Todo) -> Result<(), RepositoryError>;
    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError>;
    async fn toggle_completion(&self, id: TodoId) -> Result<(), RepositoryError>;
}
