//! Durable Store Module
//!
//! Single-file SQLite table holding cache entries, surviving process
//! restarts. All mutation goes through one long-lived connection shared for
//! the process lifetime; SQLite's own locking serializes conflicting writes.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use crate::error::{CacheError, Result};

// == Prepared SQL ==
const CREATE_SQL: &str =
    "CREATE TABLE IF NOT EXISTS entries ( key TEXT PRIMARY KEY, val BLOB, exp BLOB )";
const CREATE_INDEX_SQL: &str = "CREATE INDEX IF NOT EXISTS keyname_index ON entries (key)";
const READ_SQL: &str = "SELECT val, exp FROM entries WHERE key = ?1";
const WRITE_SQL: &str = "REPLACE INTO entries (key, val, exp) VALUES (?1, ?2, ?3)";
const INSERT_SQL: &str = "INSERT INTO entries (key, val, exp) VALUES (?1, ?2, ?3)";
const DELETE_SQL: &str = "DELETE FROM entries WHERE key = ?1";
const COUNT_SQL: &str = "SELECT COUNT(*) FROM entries";
const CLEAR_SQL: &str = "DELETE FROM entries";

// == Sqlite Store ==
/// Persistent key/value table backed by a single SQLite file.
pub struct SqliteStore {
    /// Long-lived connection, serialized across callers
    conn: Mutex<Connection>,
    /// Database file location, kept for error reporting
    path: PathBuf,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("path", &self.path).finish()
    }
}

impl SqliteStore {
    // == Open ==
    /// Opens (or creates) the backing file and ensures the table schema.
    ///
    /// Idempotent. Fails with `StorageUnavailable` when the containing
    /// directory cannot be created or the file cannot be opened.
    ///
    /// # Arguments
    /// * `path` - Location of the SQLite file
    /// * `busy_timeout` - Bounded wait on the database write lock; longer
    ///   contention surfaces as `StorageBusy`
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CacheError::StorageUnavailable(format!(
                        "cannot create cache dir {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|e| {
            CacheError::StorageUnavailable(format!("cannot open {}: {e}", path.display()))
        })?;
        conn.busy_timeout(busy_timeout)?;
        conn.execute(CREATE_SQL, [])?;
        conn.execute(CREATE_INDEX_SQL, [])?;
        debug!("Connected to {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| CacheError::Internal("connection lock poisoned".to_string()))
    }

    // == Read ==
    /// Fetches the raw value and expiry bytes for a key, if present.
    ///
    /// First match wins; the primary key guarantees it is also the only one.
    pub fn read(&self, key: &str) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(READ_SQL, params![key], |row| {
                Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .optional()?;
        Ok(row)
    }

    // == Write ==
    /// Insert-or-replace. Idempotent; never errors on a duplicate key.
    pub fn write(&self, key: &str, val: &[u8], exp: &[u8]) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(WRITE_SQL, params![key, val, exp])?;
        Ok(())
    }

    // == Insert ==
    /// Plain insert; fails with `DuplicateKey` when the key already exists.
    ///
    /// Lets the facade distinguish a first write from an overwrite.
    pub fn insert(&self, key: &str, val: &[u8], exp: &[u8]) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(INSERT_SQL, params![key, val, exp])?;
        Ok(())
    }

    // == Delete ==
    /// Removes the row if present; absence is not an error.
    pub fn delete(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(DELETE_SQL, params![key])?;
        Ok(())
    }

    // == Count ==
    /// Total row count, regardless of expiry state.
    pub fn count(&self) -> Result<u64> {
        let conn = self.conn()?;
        let count: u64 = conn.query_row(COUNT_SQL, [], |row| row.get(0))?;
        Ok(count)
    }

    // == Clear ==
    /// Removes every entry; returns how many rows were deleted.
    pub fn clear(&self) -> Result<usize> {
        let conn = self.conn()?;
        let removed = conn.execute(CLEAR_SQL, [])?;
        Ok(removed)
    }
}
