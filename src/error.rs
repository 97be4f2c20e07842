//! Error types for jn

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, JnError>;

#[derive(Debug, Error)]
pub enum JnError {
    #[error("synonym resource not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("malformed synonym group on line {line}: {content:?}")]
    MalformedGroup { line: usize, content: String },

    #[error("search index write failed: {0}")]
    IndexWrite(String),

    #[error("note not found: {0}")]
    NoteNotFound(String),

    #[error("notebook not found: {0}")]
    NotebookNotFound(String),

    #[error("note is already under edit: {0}")]
    AlreadyUnderEdit(String),

    #[error("a note with the same title already exists: {0}")]
    DuplicateTitle(String),

    #[error("invalid note file: {0}")]
    InvalidNoteFile(String),

    #[error("editor failed: {0}")]
    Editor(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("database not found: {}", .0.display())]
    DatabaseNotFound(PathBuf),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl JnError {
    /// Stable machine-readable code for robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ResourceNotFound(_) => "resource_not_found",
            Self::MalformedGroup { .. } => "malformed_group",
            Self::IndexWrite(_) => "index_write",
            Self::NoteNotFound(_) => "note_not_found",
            Self::NotebookNotFound(_) => "notebook_not_found",
            Self::AlreadyUnderEdit(_) => "already_under_edit",
            Self::DuplicateTitle(_) => "duplicate_title",
            Self::InvalidNoteFile(_) => "invalid_note_file",
            Self::Editor(_) => "editor",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::DatabaseNotFound(_) => "database_not_found",
            Self::Database(_) => "database",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Lookup failures exit with 2, everything else with 1.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoteNotFound(_) | Self::NotebookNotFound(_) | Self::DatabaseNotFound(_)
        )
    }
}
