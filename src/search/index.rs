//! Derived FTS5 index over the canonical notes.
//!
//! The index is a projection of `notes` (uid, title, body) and is only
//! eventually consistent with it: a failed index write never blocks a note
//! write, and [`IndexMaintainer::rebuild_all`] is the recovery path.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};

use rusqlite::{OptionalExtension, params};
use serde::Serialize;

use crate::core::{ChangeObserver, Note, NoteChange};
use crate::error::{JnError, Result};
use crate::storage::Database;

/// Name of the FTS5 virtual table.
pub const INDEX_TABLE: &str = "notes_jn_index";

const CREATE_INDEX_SQL: &str = "CREATE VIRTUAL TABLE IF NOT EXISTS notes_jn_index \
     USING fts5(uid UNINDEXED, title, body, tokenize = 'porter unicode61')";

/// Result of comparing the index against the canonical notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// Whether the index table exists at all.
    pub exists: bool,
    pub notes: usize,
    pub entries: usize,
    /// Notes without an index entry.
    pub missing: Vec<String>,
    /// Index entries whose note no longer exists.
    pub orphaned: Vec<String>,
    /// Uids indexed more than once.
    pub duplicated: Vec<String>,
}

impl ConsistencyReport {
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.exists
            && self.missing.is_empty() && self.orphaned.is_empty() && self.duplicated.is_empty()
    }
}

/// Writes to the derived index. Every public operation is its own transaction.
pub struct IndexMaintainer<'a> {
    db: &'a Database,
}

impl<'a> IndexMaintainer<'a> {
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn exists(&self) -> Result<bool> {
        self.db.table_exists(INDEX_TABLE)
    }

    /// Create the index table if it is missing.
    pub fn ensure_table(&self) -> Result<()> {
        self.db.conn().execute_batch(CREATE_INDEX_SQL)?;
        Ok(())
    }

    /// Insert or refresh the entry for `note`. Idempotent.
    pub fn upsert(&self, note: &Note) -> Result<()> {
        self.db
            .in_transaction(|db| upsert_entry(db, note))
            .map_err(|err| JnError::IndexWrite(format!("upsert {}: {err}", note.id)))
    }

    /// Drop the entry for `note_id`; a missing entry is not an error.
    pub fn remove(&self, note_id: &str) -> Result<()> {
        self.db
            .in_transaction(|db| {
                db.conn().execute(
                    &format!("DELETE FROM {INDEX_TABLE} WHERE uid = ?1"),
                    [note_id],
                )?;
                Ok(())
            })
            .map_err(|err| JnError::IndexWrite(format!("remove {note_id}: {err}")))
    }

    /// Drop and recreate the index, then index every canonical note.
    ///
    /// Runs as one transaction and never writes to `notes`, so it is safe to
    /// repeat at any time. Returns the number of indexed notes.
    pub fn rebuild_all(&self) -> Result<usize> {
        let count = self.db.in_transaction(|db| {
            db.conn()
                .execute_batch(&format!("DROP TABLE IF EXISTS {INDEX_TABLE}"))?;
            db.conn().execute_batch(CREATE_INDEX_SQL)?;

            let notes = db.all_notes()?;
            for note in &notes {
                upsert_entry(db, note)?;
            }
            Ok(notes.len())
        })?;

        tracing::info!(notes = count, "rebuilt search index");
        Ok(count)
    }

    /// Compare index entries with canonical notes.
    pub fn verify(&self) -> Result<ConsistencyReport> {
        self.db.in_read_transaction(|db| {
            let mut stmt = db.conn().prepare("SELECT id FROM notes")?;
            let note_ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<HashSet<_>>>()?;

            let exists = db.table_exists(INDEX_TABLE)?;
            let uids = if exists {
                let mut stmt = db
                    .conn()
                    .prepare(&format!("SELECT uid FROM {INDEX_TABLE}"))?;
                let uids = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                uids
            } else {
                Vec::new()
            };

            let mut seen: HashMap<&str, usize> = HashMap::new();
            for uid in &uids {
                *seen.entry(uid.as_str()).or_default() += 1;
            }

            let mut missing: Vec<String> = note_ids
                .iter()
                .filter(|id| !seen.contains_key(id.as_str()))
                .cloned()
                .collect();
            let mut orphaned: Vec<String> = seen
                .keys()
                .filter(|uid| !note_ids.contains(**uid))
                .map(|uid| (*uid).to_string())
                .collect();
            let mut duplicated: Vec<String> = seen
                .iter()
                .filter(|(_, count)| **count > 1)
                .map(|(uid, _)| (*uid).to_string())
                .collect();
            missing.sort();
            orphaned.sort();
            duplicated.sort();

            Ok(ConsistencyReport {
                exists,
                notes: note_ids.len(),
                entries: uids.len(),
                missing,
                orphaned,
                duplicated,
            })
        })
    }

    /// Number of index entries carrying `note_id`.
    pub fn entry_count(&self, note_id: &str) -> Result<usize> {
        let count: i64 = self.db.conn().query_row(
            &format!("SELECT COUNT(*) FROM {INDEX_TABLE} WHERE uid = ?1"),
            [note_id],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn upsert_entry(db: &Database, note: &Note) -> Result<()> {
    let existing: Option<i64> = db
        .conn()
        .query_row(
            &format!("SELECT rowid FROM {INDEX_TABLE} WHERE uid = ?1 LIMIT 1"),
            [&note.id],
            |row| row.get(0),
        )
        .optional()?;

    if existing.is_some() {
        db.conn().execute(
            &format!("UPDATE {INDEX_TABLE} SET title = ?2, body = ?3 WHERE uid = ?1"),
            params![note.id, note.title, note.body],
        )?;
    } else {
        db.conn().execute(
            &format!("INSERT INTO {INDEX_TABLE} (uid, title, body) VALUES (?1, ?2, ?3)"),
            params![note.id, note.title, note.body],
        )?;
    }
    Ok(())
}

/// Keeps the index in step with committed note changes.
///
/// Index failures are logged and counted, never propagated: the note write
/// has already committed and stays authoritative.
#[derive(Debug, Default)]
pub struct SearchIndexer {
    failures: Cell<usize>,
}

impl SearchIndexer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index writes that failed since this indexer was created.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures.get()
    }
}

impl ChangeObserver for SearchIndexer {
    fn on_change(&self, db: &Database, change: &NoteChange) {
        let maintainer = IndexMaintainer::new(db);
        let result = match change {
            NoteChange::Saved(note) => maintainer.upsert(note),
            NoteChange::Removed(note) => maintainer.remove(&note.id),
        };

        if let Err(err) = result {
            self.failures.set(self.failures.get() + 1);
            tracing::warn!(
                note_id = %change.note().id,
                "{err}; search index is out of date, run `jn index rebuild`"
            );
        }
    }
}
