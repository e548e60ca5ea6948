use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl Default for TodoId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Uuid::parse_str(s).map(TodoId) }
}

/// A locally persisted to-do item.
///
/// `completed_at` is `Some` exactly when `is_completed` is true; use
/// [`Todo::toggle_completion`] rather than flipping the flag by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Todo {
    pub fn new(title: impl Into<String>, notes: Option<String>) -> Self {
        Self {
            id: TodoId::default(),
            title: title.into(),
            notes,
            is_completed: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn toggle_completion(&mut self) { self.toggle_completion_at(Utc::now()) }

    pub fn toggle_completion_at(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_at = self.is_completed.then_some(now);
    }

    /// Copies every mutable field from `other`; `id` and `created_at` stay.
    pub fn overwrite_from(&mut self, other: &Todo) {
        self.title = other.title.clone();
        self.notes = other.notes.clone();
        self.is_completed = other.is_completed;
        self.completed_at = other.completed_at;
    }
}
