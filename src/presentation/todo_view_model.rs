use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::application::todo_use_case::TodoUseCase;
use crate::domain::todo::{Todo, TodoId};
use crate::error::TodoError;

#[derive(Debug, Clone, Default)]
pub enum TodoState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Todo>),
    /// `preserved` holds the last known-good list when a mutation failed,
    /// and is `None` when the failure was a load.
    Error { cause: Arc<TodoError>, preserved: Option<Vec<Todo>> },
}

impl TodoState {
    pub fn items(&self) -> &[Todo] {
        match self {
            TodoState::Loaded(items) => items.as_slice(),
            TodoState::Error { preserved: Some(items), .. } => items.as_slice(),
            _ => &[],
        }
    }
}

/// Holds the cached to-do list and drives optimistic local mutation.
///
/// Mutations are only honoured in `Loaded`; anywhere else they are no-ops.
/// A successful backend call patches the cached list in place instead of
/// re-fetching, a failed one moves to `Error` with the pre-mutation list.
pub struct TodoViewModel {
    use_case: Arc<dyn TodoUseCase>,
    state: watch::Sender<TodoState>,
    generation: AtomicU64,
}

impl TodoViewModel {
    pub fn new(use_case: Arc<dyn TodoUseCase>) -> Self {
        let (state, _) = watch::channel(TodoState::Idle);
        Self { use_case, state, generation: AtomicU64::new(0) }
    }

    pub fn state(&self) -> TodoState { self.state.borrow().clone() }
    pub fn subscribe(&self) -> watch::Receiver<TodoState> { self.state.subscribe() }

    pub fn todos(&self) -> Vec<Todo> { self.state.borrow().items().to_vec() }

    pub fn active_todos(&self) -> Vec<Todo> {
        self.state.borrow().items().iter().filter(|t| !t.is_completed).cloned().collect()
    }

    pub fn completed_todos(&self) -> Vec<Todo> {
        self.state.borrow().items().iter().filter(|t| t.is_completed).cloned().collect()
    }

    pub fn is_loading(&self) -> bool { matches!(*self.state.borrow(), TodoState::Loading) }

    pub fn error_message(&self) -> Option<String> {
        match &*self.state.borrow() {
            TodoState::Error { cause, .. } => Some(cause.to_string()),
            _ => None,
        }
    }

    pub async fn load_todos(&self) {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.transition(TodoState::Loading);

        let outcome = self.use_case.fetch_all().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "discarding stale to-do load");
            return;
        }
        match outcome {
            Ok(items) => self.transition(TodoState::Loaded(items)),
            Err(err) => {
                tracing::warn!(error = %err, "loading to-dos failed");
                self.transition(TodoState::Error { cause: Arc::new(err), preserved: None });
            }
        }
    }

    pub async fn create_todo(&self, title: &str, notes: Option<String>) {
        let Some((ticket, before)) = self.loaded_items("create") else { return };
        match self.use_case.create(title.to_string(), notes).await {
            Ok(todo) => self.patch(|items| items.insert(0, todo)),
            Err(err) => self.fail("create", err, ticket, before),
        }
    }

    pub async fn update_todo(&self, todo: Todo) {
        let Some((ticket, before)) = self.loaded_items("update") else { return };
        match self.use_case.update(&todo).await {
            Ok(()) => self.patch(|items| {
                if let Some(slot) = items.iter_mut().find(|t| t.id == todo.id) {
                    slot.overwrite_from(&todo);
                }
            }),
            Err(err) => self.fail("update", err, ticket, before),
        }
    }

    pub async fn delete_todo(&self, id: TodoId) {
        let Some((ticket, before)) = self.loaded_items("delete") else { return };
        match self.use_case.delete(id).await {
            Ok(()) => self.patch(|items| items.retain(|t| t.id != id)),
            Err(err) => self.fail("delete", err, ticket, before),
        }
    }

    pub async fn toggle_completion(&self, id: TodoId) {
        let Some((ticket, before)) = self.loaded_items("toggle") else { return };
        match self.use_case.toggle_completion(id).await {
            Ok(()) => self.patch(|items| {
                if let Some(todo) = items.iter_mut().find(|t| t.id == id) {
                    todo.toggle_completion();
                }
            }),
            Err(err) => self.fail("toggle", err, ticket, before),
        }
    }

    fn loaded_items(&self, action: &str) -> Option<(u64, Vec<Todo>)> {
        match &*self.state.borrow() {
            TodoState::Loaded(items) => Some((self.generation.load(Ordering::SeqCst), items.clone())),
            other => {
                tracing::debug!(action, state = state_name(other), "ignoring mutation outside Loaded");
                None
            }
        }
    }

    // The list may have been replaced while the call was in flight; only a
    // still-loaded list is patched.
    fn patch(&self, apply: impl FnOnce(&mut Vec<Todo>)) {
        self.state.send_if_modified(|state| match state {
            TodoState::Loaded(items) => {
                apply(items);
                true
            }
            other => {
                tracing::debug!(state = state_name(other), "dropping patch, list no longer loaded");
                false
            }
        });
    }

    // A load started after the mutation owns the state now; its list must
    // not be replaced by the older snapshot.
    fn fail(&self, action: &str, err: TodoError, ticket: u64, before: Vec<Todo>) {
        tracing::warn!(action, error = %err, "to-do mutation failed");
        if self.generation.load(Ordering::SeqCst) != ticket {
            tracing::debug!(action, ticket, "discarding stale mutation failure");
            return;
        }
        self.transition(TodoState::Error { cause: Arc::new(err), preserved: Some(before) });
    }

    fn transition(&self, next: TodoState) {
        tracing::debug!(state = state_name(&next), "to-do state transition");
        self.state.send_replace(next);
    }
}

fn state_name(state: &TodoState) -> &'static str {
    match state {
        TodoState::Idle => "idle",
        TodoState::Loading => "loading",
        TodoState::Loaded(_) => "loaded",
        TodoState::Error { .. } => "error",
    }
}
