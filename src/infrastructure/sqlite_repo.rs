use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    repository::TodoRepository,
    todo::{Todo, TodoId},
};
use crate::error::RepositoryError;

const SELECT_COLUMNS: &str = "SELECT id, title, notes, is_completed, created_at, completed_at FROM todos";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        // Every connection to an in-memory database would see its own empty
        // database, so those get exactly one connection that is never recycled.
        let options = if is_in_memory(database_url) {
            SqlitePoolOptions::new().max_connections(1).idle_timeout(None::<Duration>).max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options.connect(database_url).await?;
        Ok(Self { pool: Arc::new(pool) })
    }

    async fn find(&self, id: TodoId) -> Result<Todo, RepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id.0.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        match row {
            Some(row) => row_to_todo(&row),
            None => Err(not_found(id)),
        }
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                notes TEXT,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                completed_at TEXT
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS todos_created_at ON todos (created_at)")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<Todo>, RepositoryError> {
        let rows = sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC"))
            .fetch_all(&*self.pool)
            .await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn create(&self, title: String, notes: Option<String>) -> Result<Todo, RepositoryError> {
        let todo = Todo::new(title, notes);
        sqlx::query(
            "INSERT INTO todos (id, title, notes, is_completed, created_at, completed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(todo.id.0.to_string())
        .bind(&todo.title)
        .bind(&todo.notes)
        .bind(todo.is_completed)
        .bind(format_timestamp(todo.created_at))
        .bind(todo.completed_at.map(format_timestamp))
        .execute(&*self.pool)
        .await?;
        Ok(todo)
    }

    async fn update(&self, todo: &Todo) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE todos SET title = ?2, notes = ?3, is_completed = ?4, completed_at = ?5 WHERE id = ?1",
        )
        .bind(todo.id.0.to_string())
        .bind(&todo.title)
        .bind(&todo.notes)
        .bind(todo.is_completed)
        .bind(todo.completed_at.map(format_timestamp))
        .execute(&*self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(todo.id));
        }
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    async fn toggle_completion(&self, id: TodoId) -> Result<(), RepositoryError> {
        let mut todo = self.find(id).await?;
        todo.toggle_completion();
        self.update(&todo).await
    }
}

fn not_found(id: TodoId) -> RepositoryError {
    tracing::debug!(%id, "to-do not found in sqlite store");
    RepositoryError::NotFound(id)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite::memory:") || database_url.contains("mode=memory")
}

// Fixed-width UTC so lexical order in SQLite matches chronological order.
fn format_timestamp(at: DateTime<Utc>) -> String { at.to_rfc3339_opts(SecondsFormat::Nanos, true) }

fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|err| RepositoryError::CorruptRecord(format!("{column} `{raw}`: {err}")))
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, RepositoryError> {
    let id_str: String = row.try_get("id")?;
    let title: String = row.try_get("title")?;
    let notes: Option<String> = row.try_get("notes")?;
    let is_completed: bool = row.try_get("is_completed")?;
    let created_at_str: String = row.try_get("created_at")?;
    let completed_at_str: Option<String> = row.try_get("completed_at")?;

    let id = Uuid::parse_str(&id_str)
        .map_err(|err| RepositoryError::CorruptRecord(format!("id `{id_str}`: {err}")))?;
    let created_at = parse_timestamp("created_at", &created_at_str)?;
    let completed_at = completed_at_str
        .as_deref()
        .map(|raw| parse_timestamp("completed_at", raw))
        .transpose()?;

    Ok(Todo { id: TodoId(id), title, notes, is_completed, created_at, completed_at })
}

/// Makes sure a file-backed SQLite URL points at a file that exists.
pub fn prepare_sqlite_file(database_url: &str) -> std::io::Result<()> {
    if is_in_memory(database_url) { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        // On Windows, absolute paths may look like /C:/path; strip the leading slash
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() { if !parent.as_os_str().is_empty() { fs::create_dir_all(parent)?; } }
        if !p.exists() {
            let _ = OpenOptions::new().create(true).append(true).open(p)?;
        }
    }
    Ok(())
}
