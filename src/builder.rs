//! Composition root: picks concrete repositories and wires them into
//! view-models. `use_mock` swaps in the stub feed and the in-memory store.

use std::sync::Arc;

use anyhow::Result;

use crate::application::{
    feed_use_case::{FeedUseCase, FeedUseCaseImpl},
    todo_use_case::{TodoUseCase, TodoUseCaseImpl},
};
use crate::config::AppConfig;
use crate::domain::repository::TodoRepository;
use crate::infrastructure::{
    feed_repo::{HttpFeedRepository, StubFeedRepository},
    memory_repo::InMemoryTodoRepository,
    network::NetworkClient,
    sqlite_repo::{prepare_sqlite_file, SqliteTodoRepository},
};
use crate::presentation::{feed_view_model::FeedViewModel, todo_view_model::TodoViewModel};

pub struct FeedBuilder<'a> {
    config: &'a AppConfig,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self { Self { config } }

    pub fn build(&self, use_mock: bool) -> Result<FeedViewModel> {
        let use_case: Arc<dyn FeedUseCase> = if use_mock {
            Arc::new(FeedUseCaseImpl::new(StubFeedRepository))
        } else {
            let network = NetworkClient::new(&self.config.network)?;
            Arc::new(FeedUseCaseImpl::new(HttpFeedRepository::new(network)))
        };
        tracing::debug!(use_mock, "feed view-model built");
        Ok(FeedViewModel::new(use_case, self.config.feed_url.clone()))
    }
}

pub struct TodoBuilder<'a> {
    config: &'a AppConfig,
}

impl<'a> TodoBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self { Self { config } }

    pub async fn build(&self, use_mock: bool) -> Result<TodoViewModel> {
        let use_case: Arc<dyn TodoUseCase> = if use_mock {
            Arc::new(TodoUseCaseImpl::new(InMemoryTodoRepository::default()))
        } else {
            let database_url = &self.config.database_url;
            prepare_sqlite_file(database_url)?;
            let repo = SqliteTodoRepository::connect(database_url).await?;
            repo.init().await?;
            Arc::new(TodoUseCaseImpl::new(repo))
        };
        tracing::debug!(use_mock, "to-do view-model built");
        Ok(TodoViewModel::new(use_case))
    }
}
