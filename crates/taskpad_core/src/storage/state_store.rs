//! State storage contracts, in-memory adapter and SQLite adapter.
//!
//! # Responsibility
//! - Provide the `get(key) -> value|absent` / `set(key, value)` port the
//!   store persists through.
//! - Keep SQL details of the durable adapter inside this boundary.
//!
//! # Invariants
//! - A successful `set` makes the value observable to every later `get` on
//!   the same backing state.
//! - The SQLite adapter only accepts migrated, ready connections.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport error raised by state storage adapters.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it through db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value port the task list store persists through.
///
/// Mirrors the browser-storage contract the presentation layer was written
/// against: string keys, string values, absent keys are not errors.
pub trait StateStorage {
    /// Returns the stored value for `key`, or `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Process-local adapter for ephemeral sessions and tests.
#[derive(Debug, Default)]
pub struct MemoryStateStorage {
    entries: HashMap<String, String>,
}

impl MemoryStateStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStateStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable adapter over the `kv_state` table.
pub struct SqliteStateStorage {
    conn: Connection,
}

impl SqliteStateStorage {
    /// Wraps a migrated connection obtained from [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    ///
    /// # Errors
    /// - [`StorageError::UninitializedConnection`] when the schema version
    ///   does not match this binary.
    /// - [`StorageError::MissingRequiredTable`] when `kv_state` is absent.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }
}

impl StateStorage for SqliteStateStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_state WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_state (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let actual_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        ["kv_state"],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(StorageError::MissingRequiredTable("kv_state"));
    }

    Ok(())
}
