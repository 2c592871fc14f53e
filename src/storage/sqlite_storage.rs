use crate::{
    error::{BoardError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed storage: a single `kv` table keyed by slot name
pub struct SqliteStorage {
    connection: Mutex<Connection>,
}

impl SqliteStorage {
    /// Opens (creating if needed) the database at `database_path`
    pub fn new(database_path: &str) -> Result<Self> {
        let connection = Connection::open(database_path).map_err(sqlite_error)?;
        Self::with_connection(connection)
    }

    /// A private, in-memory database
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(sqlite_error)?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value BLOB NOT NULL)",
                [],
            )
            .map_err(sqlite_error)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| BoardError::StorageError("sqlite connection poisoned".to_string()))
    }
}

fn sqlite_error(e: rusqlite::Error) -> BoardError {
    BoardError::StorageError(e.to_string())
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.connection()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(sqlite_error)
    }

    async fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.connection()?
            .execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, bytes],
            )
            .map_err(sqlite_error)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.connection()?
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(sqlite_error)?;
        Ok(())
    }
}
