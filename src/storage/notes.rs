//! Canonical note and notebook queries.
//!
//! These run on whatever transaction is open on the connection; callers
//! decide the transaction boundary.

use std::collections::HashMap;

use rusqlite::{OptionalExtension, Row, params};

use crate::core::{Folder, Note};
use crate::error::Result;
use crate::storage::Database;

const NOTE_COLUMNS: &str = "id, parent_id, title, body, created_time, updated_time, \
     user_created_time, user_updated_time, is_conflict";

/// Joplin's item type for notes in `deleted_items`.
const ITEM_TYPE_NOTE: i64 = 1;

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        parent_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        body: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        created_time: row.get(4)?,
        updated_time: row.get(5)?,
        user_created_time: row.get(6)?,
        user_updated_time: row.get(7)?,
        is_conflict: row.get::<_, i64>(8)? != 0,
    })
}

fn folder_from_row(row: &Row<'_>) -> rusqlite::Result<Folder> {
    Ok(Folder {
        id: row.get(0)?,
        parent_id: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        title: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    })
}

impl Database {
    pub fn get_note(&self, id: &str) -> Result<Option<Note>> {
        let sql = format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1");
        let note = self
            .conn()
            .query_row(&sql, [id], note_from_row)
            .optional()?;
        Ok(note)
    }

    /// Exact title match. When several notes share a title the oldest wins.
    pub fn find_note_by_title(&self, title: &str) -> Result<Option<Note>> {
        let sql = format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE title = ?1 ORDER BY created_time LIMIT 1"
        );
        let note = self
            .conn()
            .query_row(&sql, [title], note_from_row)
            .optional()?;
        Ok(note)
    }

    /// Fetch several notes, returned in the order of `ids`; unknown ids are skipped.
    pub fn get_notes(&self, ids: &[String]) -> Result<Vec<Note>> {
        let mut by_id = HashMap::with_capacity(ids.len());
        for id in ids {
            if by_id.contains_key(id) {
                continue;
            }
            if let Some(note) = self.get_note(id)? {
                by_id.insert(id.clone(), note);
            }
        }
        Ok(ids.iter().filter_map(|id| by_id.get(id).cloned()).collect())
    }

    pub fn all_notes(&self) -> Result<Vec<Note>> {
        self.select_notes(&format!("SELECT {NOTE_COLUMNS} FROM notes"))
    }

    /// Notes whose body is empty, ordered by title.
    pub fn empty_notes(&self) -> Result<Vec<Note>> {
        self.select_notes(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE body IS NULL OR body = '' ORDER BY title"
        ))
    }

    /// Notes flagged by the sync engine as conflicting copies.
    pub fn conflict_notes(&self) -> Result<Vec<Note>> {
        self.select_notes(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE is_conflict = 1 ORDER BY title"
        ))
    }

    pub fn note_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn select_notes(&self, sql: &str) -> Result<Vec<Note>> {
        let mut stmt = self.conn().prepare(sql)?;
        let rows = stmt.query_map([], note_from_row)?;
        let notes = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    pub fn insert_note(&self, note: &Note, source: &str) -> Result<usize> {
        let rows = self.conn().execute(
            "INSERT INTO notes (id, parent_id, title, body, created_time, updated_time,
                                user_created_time, user_updated_time, is_conflict,
                                source, source_application)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                note.id,
                note.parent_id,
                note.title,
                note.body,
                note.created_time,
                note.updated_time,
                note.user_created_time,
                note.user_updated_time,
                i64::from(note.is_conflict),
                source,
            ],
        )?;
        Ok(rows)
    }

    pub fn update_note(&self, note: &Note) -> Result<usize> {
        let rows = self.conn().execute(
            "UPDATE notes
             SET parent_id = ?2, title = ?3, body = ?4, updated_time = ?5,
                 user_updated_time = ?6, is_conflict = ?7
             WHERE id = ?1",
            params![
                note.id,
                note.parent_id,
                note.title,
                note.body,
                note.updated_time,
                note.user_updated_time,
                i64::from(note.is_conflict),
            ],
        )?;
        Ok(rows)
    }

    pub fn delete_note(&self, id: &str) -> Result<usize> {
        let rows = self.conn().execute("DELETE FROM notes WHERE id = ?1", [id])?;
        Ok(rows)
    }

    /// Record a note deletion so the sync engine propagates it.
    pub fn register_deletion(&self, id: &str, sync_target: i64, deleted_time: i64) -> Result<()> {
        self.conn().execute(
            "INSERT INTO deleted_items (item_type, item_id, deleted_time, sync_target)
             VALUES (?1, ?2, ?3, ?4)",
            params![ITEM_TYPE_NOTE, id, deleted_time, sync_target],
        )?;
        Ok(())
    }

    pub fn get_folder(&self, id: &str) -> Result<Option<Folder>> {
        let folder = self
            .conn()
            .query_row(
                "SELECT id, parent_id, title FROM folders WHERE id = ?1",
                [id],
                folder_from_row,
            )
            .optional()?;
        Ok(folder)
    }

    pub fn find_folder_by_title(&self, title: &str) -> Result<Option<Folder>> {
        let folder = self
            .conn()
            .query_row(
                "SELECT id, parent_id, title FROM folders WHERE title = ?1
                 ORDER BY created_time LIMIT 1",
                [title],
                folder_from_row,
            )
            .optional()?;
        Ok(folder)
    }

    pub fn insert_folder(&self, folder: &Folder, now: i64) -> Result<()> {
        self.conn().execute(
            "INSERT INTO folders (id, parent_id, title, created_time, updated_time,
                                  user_created_time, user_updated_time)
             VALUES (?1, ?2, ?3, ?4, ?4, ?4, ?4)",
            params![folder.id, folder.parent_id, folder.title, now],
        )?;
        Ok(())
    }
}
