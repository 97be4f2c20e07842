//! Core note types and logic

pub mod document;
pub mod lucky;
pub mod note;
pub mod repository;

pub use document::NoteDocument;
pub use note::{Folder, Note, new_note_id, now_millis};
pub use repository::{ChangeObserver, NoteChange, NoteRepository};
