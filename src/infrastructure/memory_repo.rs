use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};
use crate::error::RepositoryError;

/// Process-local store used by tests and the mock builder.
///
/// Items are kept newest-first so equal timestamps still list the most
/// recent `create` first after the stable sort in `fetch_all`.
#[derive(Clone, Default)]
pub struct InMemoryTodoRepository {
    items: Arc<Mutex<Vec<Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn with_todos(todos: Vec<Todo>) -> Self { Self { items: Arc::new(Mutex::new(todos)) } }
}

fn position(items: &[Todo], id: TodoId) -> Result<usize, RepositoryError> {
    items.iter().position(|t| t.id == id).ok_or_else(|| {
        tracing::debug!(%id, "to-do not found in memory store");
        RepositoryError::NotFound(id)
    })
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn init(&self) -> Result<(), RepositoryError> { Ok(()) }

    async fn fetch_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let mut todos = self.items.lock().await.clone();
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, RepositoryError> {
        let todo = Todo::new(title, notes);
        self.items.lock().await.insert(0, todo.clone());
        Ok(todo)
    }

    async fn update(&self, todo: &Todo) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().await;
        let index = position(&items, todo.id)?;
        items[index].overwrite_from(todo);
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().await;
        let index = position(&items, id)?;
        items.remove(index);
        Ok(())
    }

    async fn toggle_completion(&self, id: TodoId) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().await;
        let index = position(&items, id)?;
        items[index].toggle_completion();
        Ok(())
    }
}
