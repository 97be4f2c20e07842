//! Canonical Joplin tables used by jn.
//!
//! Only the columns jn reads or writes are declared; the real Joplin schema
//! carries more, all with defaults. `bootstrap` is idempotent and never touches
//! tables that already exist.

use rusqlite::Connection;

use crate::error::Result;

const CANONICAL_SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS folders (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    created_time INT NOT NULL,
    updated_time INT NOT NULL,
    user_created_time INT NOT NULL DEFAULT 0,
    user_updated_time INT NOT NULL DEFAULT 0,
    parent_id TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS notes (
    id TEXT PRIMARY KEY,
    parent_id TEXT NOT NULL DEFAULT '',
    title TEXT NOT NULL DEFAULT '',
    body TEXT NOT NULL DEFAULT '',
    created_time INT NOT NULL,
    updated_time INT NOT NULL,
    is_conflict INT NOT NULL DEFAULT 0,
    user_created_time INT NOT NULL DEFAULT 0,
    user_updated_time INT NOT NULL DEFAULT 0,
    source TEXT NOT NULL DEFAULT '',
    source_application TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS notes_title ON notes (title);
CREATE INDEX IF NOT EXISTS folders_title ON folders (title);

CREATE TABLE IF NOT EXISTS deleted_items (
    id INTEGER PRIMARY KEY,
    item_type INT NOT NULL,
    item_id TEXT NOT NULL,
    deleted_time INT NOT NULL,
    sync_target INT NOT NULL
);
";

/// Create the canonical tables if they are missing.
pub fn bootstrap(conn: &Connection) -> Result<()> {
    conn.execute_batch(CANONICAL_SCHEMA)?;
    Ok(())
}
