//! Note write path with explicit change notification.
//!
//! The repository owns the canonical writes. Each committed write yields a
//! [`NoteChange`] that is handed to every subscribed [`ChangeObserver`]
//! after the canonical transaction has committed, so an observer can never
//! roll a note write back.

use crate::core::document::NoteDocument;
use crate::core::note::{Folder, Note, now_millis};
use crate::error::{JnError, Result};
use crate::storage::Database;

/// Value written to `notes.source` and `notes.source_application`.
pub const SOURCE_APPLICATION: &str = "jnotes";

/// A committed change to the canonical note table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteChange {
    Saved(Note),
    Removed(Note),
}

impl NoteChange {
    #[must_use]
    pub const fn note(&self) -> &Note {
        match self {
            Self::Saved(note) | Self::Removed(note) => note,
        }
    }
}

/// Subscriber for committed note changes.
///
/// Observers run after the canonical commit and cannot fail the write; they
/// handle (and report) their own errors.
pub trait ChangeObserver {
    fn on_change(&self, db: &Database, change: &NoteChange);
}

pub struct NoteRepository<'a> {
    db: &'a Database,
    observers: Vec<&'a dyn ChangeObserver>,
    deletion_sync_target: Option<i64>,
}

impl<'a> NoteRepository<'a> {
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            observers: Vec::new(),
            deletion_sync_target: None,
        }
    }

    /// Record deletions in `deleted_items` for the given sync target.
    #[must_use]
    pub const fn with_deletion_sync(mut self, target: Option<i64>) -> Self {
        self.deletion_sync_target = target;
        self
    }

    pub fn subscribe(&mut self, observer: &'a dyn ChangeObserver) {
        self.observers.push(observer);
    }

    pub const fn db(&self) -> &'a Database {
        self.db
    }

    pub fn get(&self, id: &str) -> Result<Note> {
        self.db
            .get_note(id)?
            .ok_or_else(|| JnError::NoteNotFound(id.to_string()))
    }

    pub fn find_by_title(&self, title: &str) -> Result<Note> {
        self.db
            .find_note_by_title(title)?
            .ok_or_else(|| JnError::NoteNotFound(format!("title {title:?}")))
    }

    pub fn notebook(&self, id: &str) -> Result<Folder> {
        self.db
            .get_folder(id)?
            .ok_or_else(|| JnError::NotebookNotFound(format!("id {id}")))
    }

    pub fn notebook_by_title(&self, title: &str) -> Result<Folder> {
        self.db
            .find_folder_by_title(title)?
            .ok_or_else(|| JnError::NotebookNotFound(title.to_string()))
    }

    /// Create a note in the named notebook. Titles must be unique.
    pub fn create(&self, title: &str, notebook_title: &str, body: &str) -> Result<Note> {
        let note = self.db.in_transaction(|db| {
            if db.find_note_by_title(title)?.is_some() {
                return Err(JnError::DuplicateTitle(title.to_string()));
            }
            let notebook = db
                .find_folder_by_title(notebook_title)?
                .ok_or_else(|| JnError::NotebookNotFound(notebook_title.to_string()))?;

            let note = Note::new(title, body, &notebook.id);
            db.insert_note(&note, SOURCE_APPLICATION)?;
            Ok(note)
        })?;

        tracing::info!(note_id = %note.id, title = %note.title, "created note");
        self.notify(&NoteChange::Saved(note.clone()));
        Ok(note)
    }

    /// Persist the note's current fields, bumping its update times.
    pub fn save(&self, note: &mut Note) -> Result<()> {
        note.touch();
        let rows = self.db.in_transaction(|db| db.update_note(note))?;
        if rows != 1 {
            return Err(JnError::NoteNotFound(note.id.clone()));
        }

        tracing::debug!(note_id = %note.id, "saved note");
        self.notify(&NoteChange::Saved(note.clone()));
        Ok(())
    }

    /// Remove the note. Recording the deletion for sync is best effort.
    pub fn delete(&self, note: &Note) -> Result<()> {
        self.db.in_transaction(|db| {
            db.delete_note(&note.id)?;
            if let Some(target) = self.deletion_sync_target {
                if let Err(err) = db.register_deletion(&note.id, target, now_millis()) {
                    tracing::warn!(
                        note_id = %note.id,
                        "could not record deletion for sync: {err}"
                    );
                }
            }
            Ok(())
        })?;

        tracing::info!(note_id = %note.id, title = %note.title, "deleted note");
        self.notify(&NoteChange::Removed(note.clone()));
        Ok(())
    }

    /// Copy an edited document into `note` without saving it.
    ///
    /// An unknown notebook name keeps the current notebook.
    pub fn apply_document(&self, note: &mut Note, document: &NoteDocument) -> Result<()> {
        match document {
            NoteDocument::Empty => {
                note.title.clear();
                note.body.clear();
            }
            NoteDocument::Content {
                title,
                notebook,
                body,
            } => {
                note.title.clone_from(title);
                note.body.clone_from(body);
                match self.db.find_folder_by_title(notebook)? {
                    Some(folder) if folder.id != note.parent_id => {
                        tracing::info!(
                            note_id = %note.id,
                            notebook = %folder.title,
                            "note moved to another notebook"
                        );
                        note.parent_id = folder.id;
                    }
                    Some(_) => {}
                    None => {
                        tracing::warn!(
                            note_id = %note.id,
                            "notebook #{notebook} not found, keeping the current notebook"
                        );
                    }
                }
            }
        }
        Ok(())
    }

    fn notify(&self, change: &NoteChange) {
        for observer in &self.observers {
            observer.on_change(self.db, change);
        }
    }
}
