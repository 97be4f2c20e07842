//! Plain-text note file used for editor round-trips.
//!
//! Layout:
//!
//! ```text
//! <title>
//! #<notebook title>
//! mdate=YYYY-MM-DD
//! cdate=YYYY-MM-DD
//!
//! <body...>
//! ```

use crate::core::note::{Note, format_date};
use crate::error::{JnError, Result};

/// Parsed content of a note file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteDocument {
    /// The file was emptied; the note should be removed.
    Empty,
    Content {
        title: String,
        notebook: String,
        body: String,
    },
}

/// Render a note in the file layout.
#[must_use]
pub fn render(note: &Note, notebook_title: &str) -> String {
    format!(
        "{}\n#{}\nmdate={}\ncdate={}\n\n{}",
        note.title,
        notebook_title,
        format_date(note.updated_time),
        format_date(note.created_time),
        note.body
    )
}

/// Parse the file layout back into its parts.
pub fn parse(text: &str) -> Result<NoteDocument> {
    if text.len() <= 1 {
        return Ok(NoteDocument::Empty);
    }

    let (title, rest) = split_line(text);
    let (notebook_line, rest) = split_line(rest);
    let notebook_line = notebook_line.trim();
    let Some(notebook) = notebook_line.strip_prefix('#') else {
        return Err(JnError::InvalidNoteFile(format!(
            "notebook line must start with '#', got {notebook_line:?}"
        )));
    };

    // mdate and cdate are informational only
    let (_, rest) = split_line(rest);
    let (_, rest) = split_line(rest);

    let (separator, body) = split_line(rest);
    if !separator.trim().is_empty() {
        return Err(JnError::InvalidNoteFile(format!(
            "expected a blank line before the body, got {separator:?}"
        )));
    }

    Ok(NoteDocument::Content {
        title: title.trim().to_string(),
        notebook: notebook.to_string(),
        body: body.trim().to_string(),
    })
}

fn split_line(text: &str) -> (&str, &str) {
    match text.find('\n') {
        Some(idx) => (text[..idx].trim_end_matches('\r'), &text[idx + 1..]),
        None => (text, ""),
    }
}
