//! Editor round-trip for a single note.
//!
//! The note is rendered to a file in the temp directory and an external
//! editor is spawned on it. While the editor runs the file's mtime is polled
//! and each change is saved, so a crash loses little. After the editor exits
//! the final content decides the outcome: unchanged, saved, or deleted.
//!
//! A sentinel file named after the note id marks the note as under edit.
//! It is left behind when the editor fails so the next attempt is refused
//! until someone has looked at the note.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

use crate::config::EditorConfig;
use crate::core::document::{self, NoteDocument};
use crate::core::{Note, NoteRepository};
use crate::error::{JnError, Result};

/// What happened to the note once the editor closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Saved,
    Deleted,
}

impl EditOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Saved => "saved",
            Self::Deleted => "deleted",
        }
    }
}

/// Spawns the configured editor on rendered notes.
#[derive(Debug, Clone)]
pub struct NoteEditor {
    command: String,
    temp_dir: PathBuf,
    poll_interval: Duration,
}

impl NoteEditor {
    #[must_use]
    pub fn new(command: impl Into<String>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            temp_dir: temp_dir.into(),
            poll_interval: Duration::from_millis(500),
        }
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.command.clone(), config.temp_dir.clone())
            .with_poll_interval(Duration::from_millis(config.poll_interval_ms))
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    #[must_use]
    pub fn sentinel_path(&self, note: &Note) -> PathBuf {
        self.temp_dir.join(&note.id)
    }

    #[must_use]
    pub fn note_path(&self, note: &Note) -> PathBuf {
        self.temp_dir
            .join(format!("{}.md", note.title.replace('/', "_")))
    }

    /// Edit `note` until the editor exits and apply the result through `repo`.
    pub fn edit(&self, repo: &NoteRepository<'_>, mut note: Note) -> Result<EditOutcome> {
        let original = note.clone();
        let notebook = repo.notebook(&note.parent_id)?;

        std::fs::create_dir_all(&self.temp_dir)?;
        let sentinel = self.sentinel_path(&note);
        claim_sentinel(&sentinel, &note.title)?;

        let path = self.note_path(&note);
        if path.exists() {
            remove_quietly(&sentinel);
            return Err(JnError::AlreadyUnderEdit(format!(
                "{} (file {} exists)",
                note.title,
                path.display()
            )));
        }
        if let Err(err) = std::fs::write(&path, document::render(&note, &notebook.title)) {
            remove_quietly(&sentinel);
            return Err(err.into());
        }

        let argv = build_command(&self.command, &path, &note.title);
        tracing::debug!(?argv, note_id = %note.id, "spawning editor");
        let mut child = match argv.split_first() {
            Some((program, args)) => Command::new(program).args(args).spawn(),
            None => Err(std::io::Error::new(
                ErrorKind::InvalidInput,
                "editor command is empty",
            )),
        }
        .map_err(|err| {
            remove_quietly(&path);
            remove_quietly(&sentinel);
            JnError::Editor(format!("spawn {:?}: {err}", self.command))
        })?;

        let mut last_modified = modified_time(&path)?;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            std::thread::sleep(self.poll_interval);
            let modified = modified_time(&path)?;
            if modified > last_modified {
                last_modified = modified;
                self.save_progress(repo, &mut note, &path);
            }
        };

        if !status.success() {
            return Err(JnError::Editor(format!(
                "editor exited with {status}; inspect {} before editing again",
                path.display()
            )));
        }

        let document = document::parse(&std::fs::read_to_string(&path)?)?;
        repo.apply_document(&mut note, &document)?;
        std::fs::remove_file(&path)?;
        std::fs::remove_file(&sentinel)?;

        if note.title == original.title
            && note.body == original.body
            && note.parent_id == original.parent_id
        {
            tracing::info!(note_id = %note.id, "finished editing with no changes");
            return Ok(EditOutcome::Unchanged);
        }

        if note.is_blank() {
            repo.delete(&note)?;
            return Ok(EditOutcome::Deleted);
        }

        repo.save(&mut note)?;
        tracing::info!(note_id = %note.id, title = %note.title, "note saved");
        Ok(EditOutcome::Saved)
    }

    /// Save intermediate content; failures are reported and editing goes on.
    fn save_progress(&self, repo: &NoteRepository<'_>, note: &mut Note, path: &Path) {
        let document = match std::fs::read_to_string(path)
            .map_err(JnError::from)
            .and_then(|text| document::parse(&text))
        {
            Ok(NoteDocument::Empty) => return,
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(note_id = %note.id, "skipping intermediate save: {err}");
                return;
            }
        };

        let result = repo
            .apply_document(note, &document)
            .and_then(|()| repo.save(note));
        if let Err(err) = result {
            tracing::warn!(note_id = %note.id, "intermediate save failed: {err}");
        }
    }
}

/// Build the editor argv from a template.
///
/// The template is split on whitespace with single and double quotes
/// grouping words; `{path}` and `{title}` are substituted in every word.
/// Without a `{path}` placeholder the path is appended as the last argument.
#[must_use]
pub fn build_command(template: &str, path: &Path, title: &str) -> Vec<String> {
    let path = path.to_string_lossy();
    let mut words = split_words(template);
    let has_path = words.iter().any(|word| word.contains("{path}"));

    for word in &mut words {
        *word = word.replace("{path}", &path).replace("{title}", title);
    }
    if !has_path {
        words.push(path.into_owned());
    }
    words
}

fn split_words(template: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in template.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn claim_sentinel(sentinel: &Path, title: &str) -> Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(sentinel) {
        Ok(_) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            Err(JnError::AlreadyUnderEdit(title.to_string()))
        }
        Err(err) => Err(err.into()),
    }
}

fn modified_time(path: &Path) -> Result<SystemTime> {
    Ok(std::fs::metadata(path)?.modified()?)
}

fn remove_quietly(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        tracing::debug!(path = %path.display(), "cleanup failed: {err}");
    }
}
