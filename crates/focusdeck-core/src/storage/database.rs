//! SQLite-backed key-value storage.
//!
//! The dashboard is persisted as one JSON document in a single row of the
//! `kv` table. [`SqliteSlot`] exposes that row as a [`StateSlot`].

use rusqlite::{params, Connection};
use std::path::Path;

use super::slot::StateSlot;
use crate::error::StorageError;

/// Default `kv` key holding the dashboard.
pub const DEFAULT_SLOT_KEY: &str = "focusdeck-dashboard";

/// SQLite database holding the `kv` table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Returns whether it existed.
    pub fn kv_delete(&self, key: &str) -> Result<bool, rusqlite::Error> {
        let removed = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(removed > 0)
    }
}

/// One `kv` row used as the dashboard's durable slot.
pub struct SqliteSlot {
    db: Database,
    key: String,
}

impl SqliteSlot {
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Slot at `key` in the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &Path, key: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open(path)?, key))
    }

    /// # Errors
    /// Returns an error if the in-memory schema cannot be created.
    pub fn in_memory(key: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self::new(Database::open_in_memory()?, key))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl StateSlot for SqliteSlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.db
            .kv_get(&self.key)
            .map_err(|e| StorageError::ReadFailed {
                key: self.key.clone(),
                message: e.to_string(),
            })
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        self.db
            .kv_set(&self.key, payload)
            .map_err(|e| match StorageError::from(e) {
                StorageError::Locked => StorageError::Locked,
                other => StorageError::WriteFailed {
                    key: self.key.clone(),
                    message: other.to_string(),
                },
            })
    }
}
