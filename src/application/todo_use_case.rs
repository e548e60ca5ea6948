use async_trait::async_trait;

use crate::domain::repository::TodoRepository;
use crate::domain::todo::{Todo, TodoId};
use crate::error::TodoError;

/// Business rules for the to-do path. Titles are validated here and nowhere
/// else; storage accepts whatever it is given.
#[async_trait]
pub trait TodoUseCase: Send + Sync + 'static {
    async fn fetch_all(&self) -> Result<Vec<Todo>, TodoError>;
    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, TodoError>;
    async fn update(&self, todo: &Todo) -> Result<(), TodoError>;
    async fn delete(&self, id: TodoId) -> Result<(), TodoError>;
    async fn toggle_completion(&self, id: TodoId) -> Result<(), TodoError>;
}

#[derive(Clone)]
pub struct TodoUseCaseImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoUseCaseImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }
}

fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        tracing::debug!("rejecting blank to-do title");
        return Err(TodoError::EmptyTitle);
    }
    Ok(())
}

#[async_trait]
impl<R: TodoRepository> TodoUseCase for TodoUseCaseImpl<R> {
    async fn fetch_all(&self) -> Result<Vec<Todo>, TodoError> { Ok(self.repo.fetch_all().await?) }

    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, TodoError> {
        validate_title(&title)?;
        Ok(self.repo.create(title, notes).await?)
    }

    async fn update(&self, todo: &Todo) -> Result<(), TodoError> {
        validate_title(&todo.title)?;
        Ok(self.repo.update(todo).await?)
    }

    async fn delete(&self, id: TodoId) -> Result<(), TodoError> { Ok(self.repo.delete(id).await?) }

    async fn toggle_completion(&self, id: TodoId) -> Result<(), TodoError> { Ok(self.repo.toggle_completion(id).await?) }
}
