#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use momentum_core::{
    application::{feed_use_case::FeedUseCase, todo_use_case::TodoUseCase},
    domain::{
        character::{Character, FeedInfo, FeedResult},
        todo::{Todo, TodoId},
    },
    error::{FeedError, NetworkError, RepositoryError, TodoError},
};
use url::Url;

pub fn character(id: i64, name: &str) -> Character {
    Character { id, name: name.to_string(), species: Some("Human".to_string()), image_url: None }
}

pub fn feed(results: Vec<Character>) -> FeedResult {
    FeedResult { info: FeedInfo { count: results.len() as i64, pages: 1 }, results }
}

/// Canned outcome for one feed fetch. Failures carry the HTTP status that
/// the fake server "returned".
pub type FeedOutcome = Result<FeedResult, u16>;

pub struct StubFeedUseCase {
    result: Mutex<FeedOutcome>,
    script: Mutex<VecDeque<(Duration, FeedOutcome)>>,
    calls: Mutex<Vec<Url>>,
}

impl StubFeedUseCase {
    pub fn new(result: FeedOutcome) -> Self {
        Self { result: Mutex::new(result), script: Mutex::new(VecDeque::new()), calls: Mutex::new(Vec::new()) }
    }

    /// Each call consumes the next entry, sleeping for its delay first.
    /// Falls back to the fixed result once the script runs out.
    pub fn scripted(entries: Vec<(Duration, FeedOutcome)>) -> Self {
        let stub = Self::new(Err(500));
        *stub.script.lock().unwrap() = entries.into();
        stub
    }

    pub fn set_result(&self, result: FeedOutcome) { *self.result.lock().unwrap() = result; }

    pub fn calls(&self) -> Vec<Url> { self.calls.lock().unwrap().clone() }

    fn current_result(&self) -> FeedOutcome { self.result.lock().unwrap().clone() }
}

#[async_trait]
impl FeedUseCase for StubFeedUseCase {
    async fn fetch_feed(&self, url: &Url) -> Result<FeedResult, FeedError> {
        self.calls.lock().unwrap().push(url.clone());
        let scripted = self.script.lock().unwrap().pop_front();
        let outcome = match scripted {
            Some((delay, outcome)) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            None => self.current_result(),
        };
        outcome.map_err(|status| FeedError::Network(NetworkError::InvalidResponse { status }))
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Failure {
    EmptyTitle,
    NotFound,
}

impl Failure {
    fn into_error(self) -> TodoError {
        match self {
            Failure::EmptyTitle => TodoError::EmptyTitle,
            Failure::NotFound => TodoError::Repository(RepositoryError::NotFound(TodoId::default())),
        }
    }
}

/// Use case double whose every operation can be told to fail.
pub struct ScriptedTodoUseCase {
    pub fetch_all: Mutex<Result<Vec<Todo>, Failure>>,
    pub create: Mutex<Option<Failure>>,
    pub update: Mutex<Option<Failure>>,
    pub delete: Mutex<Option<Failure>>,
    pub toggle: Mutex<Option<Failure>>,
    /// How long `delete` waits before answering.
    pub delete_delay: Mutex<Duration>,
}

impl Default for ScriptedTodoUseCase {
    fn default() -> Self {
        Self {
            fetch_all: Mutex::new(Ok(Vec::new())),
            create: Mutex::new(None),
            update: Mutex::new(None),
            delete: Mutex::new(None),
            toggle: Mutex::new(None),
            delete_delay: Mutex::new(Duration::ZERO),
        }
    }
}

impl ScriptedTodoUseCase {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let use_case = Self::default();
        *use_case.fetch_all.lock().unwrap() = Ok(todos);
        use_case
    }

    fn check(slot: &Mutex<Option<Failure>>) -> Result<(), TodoError> {
        match *slot.lock().unwrap() {
            Some(failure) => Err(failure.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TodoUseCase for ScriptedTodoUseCase {
    async fn fetch_all(&self) -> Result<Vec<Todo>, TodoError> {
        self.fetch_all.lock().unwrap().clone().map_err(Failure::into_error)
    }

    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, TodoError> {
        Self::check(&self.create)?;
        Ok(Todo::new(title, notes))
    }

    async fn update(&self, _todo: &Todo) -> Result<(), TodoError> { Self::check(&self.update) }

    async fn delete(&self, _id: TodoId) -> Result<(), TodoError> {
        let delay = *self.delete_delay.lock().unwrap();
        tokio::time::sleep(delay).await;
        Self::check(&self.delete)
    }

    async fn toggle_completion(&self, _id: TodoId) -> Result<(), TodoError> { Self::check(&self.toggle) }
}
