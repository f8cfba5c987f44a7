//! Task collection repository and the greeting-name slot.
//!
//! # Responsibility
//! - Load and save the full task collection against the `todos` table.
//! - Keep the deadline text round-trippable (RFC 3339, UTC).
//! - Expose the independent display-name slot in the `settings` table.
//!
//! # Invariants
//! - Row `position` mirrors collection order on every save.
//! - An empty `todos` table loads as "no prior state" (`None`), so a fresh
//!   or fully cleared install falls back to seed data.
//! - Name validation is a store concern; rows are persisted and loaded
//!   without re-checking name length.

use crate::db::DbError;
use crate::model::todo::{Priority, Todo, TodoId};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TODO_SELECT_SQL: &str = "SELECT
    id,
    name,
    is_done,
    priority,
    deadline
FROM todos
ORDER BY position ASC";

const DISPLAY_NAME_KEY: &str = "display_name";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable-slot interface the store persists through.
pub trait TodoRepository {
    /// Reads the stored collection in its saved order.
    ///
    /// Returns `None` when no prior state exists, including the case of a
    /// present-but-empty collection.
    fn load(&self) -> RepoResult<Option<Vec<Todo>>>;

    /// Replaces the stored collection with `todos`, preserving order.
    fn save(&self, todos: &[Todo]) -> RepoResult<()>;

    /// Reads the free-text greeting name, if one was ever stored.
    fn load_display_name(&self) -> RepoResult<Option<String>>;

    /// Stores the free-text greeting name. No validation applies.
    fn save_display_name(&self, name: &str) -> RepoResult<()>;
}

/// SQLite-backed repository.
pub struct SqliteTodoRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTodoRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TodoRepository for SqliteTodoRepository<'_> {
    fn load(&self) -> RepoResult<Option<Vec<Todo>>> {
        let mut stmt = self.conn.prepare(TODO_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut todos = Vec::new();

        while let Some(row) = rows.next()? {
            todos.push(parse_todo_row(row)?);
        }

        if todos.is_empty() {
            return Ok(None);
        }

        Ok(Some(todos))
    }

    fn save(&self, todos: &[Todo]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM todos;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO todos (id, name, is_done, priority, deadline, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            )?;
            for (position, todo) in todos.iter().enumerate() {
                stmt.execute(params![
                    todo.id.to_string(),
                    todo.name.as_str(),
                    bool_to_int(todo.is_done),
                    u8::from(todo.priority),
                    todo.deadline.map(|deadline| deadline.to_rfc3339()),
                    position as i64,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn load_display_name(&self) -> RepoResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1;")?;
        let mut rows = stmt.query([DISPLAY_NAME_KEY])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn save_display_name(&self, name: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2);",
            params![DISPLAY_NAME_KEY, name],
        )?;
        Ok(())
    }
}

fn parse_todo_row(row: &Row<'_>) -> RepoResult<Todo> {
    let id_text: String = row.get("id")?;
    let id: TodoId = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in todos.id")))?;

    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in todos.is_done"
            )));
        }
    };

    let priority_raw: i64 = row.get("priority")?;
    let priority = u8::try_from(priority_raw)
        .ok()
        .and_then(|value| Priority::try_from(value).ok())
        .ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid priority value `{priority_raw}` in todos.priority"
            ))
        })?;

    let deadline = match row.get::<_, Option<String>>("deadline")? {
        Some(text) => Some(parse_deadline(&text)?),
        None => None,
    };

    Ok(Todo {
        id,
        name: row.get("name")?,
        is_done,
        priority,
        deadline,
    })
}

fn parse_deadline(text: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|deadline| deadline.with_timezone(&Utc))
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid deadline value `{text}` in todos.deadline"
            ))
        })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
