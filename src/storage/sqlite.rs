//! SQLite database layer

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::error::{JnError, Result};
use crate::storage::schema;

/// Handle on the Joplin database shared by the canonical tables and the search index.
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open an existing Joplin database.
    ///
    /// The database belongs to Joplin, so it is never created here and its
    /// journal mode is left alone.
    pub fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(JnError::DatabaseNotFound(path.to_path_buf()));
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(busy_timeout)?;
        tracing::debug!(path = %path.display(), "opened database");

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Create (or open) a database and make sure the canonical tables exist.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        schema::bootstrap(&conn)?;

        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// In-memory database with the canonical tables, for tests and scratch work.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::bootstrap(&conn)?;
        Ok(Self {
            conn,
            path: PathBuf::from(":memory:"),
        })
    }

    /// Get a reference to the connection
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` inside a write transaction.
    ///
    /// Commits when `f` returns `Ok`; the transaction is rolled back when it
    /// is dropped on the error path.
    pub fn in_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    /// Run `f` inside a read transaction so every statement sees one snapshot.
    pub fn in_read_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Deferred)?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    /// True when a table (or virtual table) with this name exists.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
