//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod conflicts;
pub mod delete;
pub mod edit;
pub mod empty;
pub mod index;
pub mod lucky;
pub mod new;
pub mod notebook;
pub mod search;
pub mod show;

use crate::app::AppContext;
use crate::core::{Note, NoteRepository};
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full-text search over notes
    Search(search::SearchArgs),

    /// Create a note
    New(new::NewArgs),

    /// Edit a note in the external editor
    Edit(edit::EditArgs),

    /// Print notes in the editor file format
    Show(show::ShowArgs),

    /// Delete a note
    Delete(delete::DeleteArgs),

    /// Maintain the search index
    Index(index::IndexArgs),

    /// List (and optionally delete) notes with an empty body
    Empty(empty::EmptyArgs),

    /// Inspect notes flagged as sync conflicts
    Conflicts(conflicts::ConflictsArgs),

    /// Look up a notebook by name
    Notebook(notebook::NotebookArgs),

    /// Extract the solution code stub from a note
    Lucky(lucky::LuckyArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::New(args) => new::run(ctx, args),
        Commands::Edit(args) => edit::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::Index(args) => index::run(ctx, args),
        Commands::Empty(args) => empty::run(ctx, args),
        Commands::Conflicts(args) => conflicts::run(ctx, args),
        Commands::Notebook(args) => notebook::run(ctx, args),
        Commands::Lucky(args) => lucky::run(ctx, args),
    }
}

/// Title of the note's notebook, empty when the notebook is gone.
pub(crate) fn notebook_title(repo: &NoteRepository<'_>, note: &Note) -> Result<String> {
    Ok(repo
        .db()
        .get_folder(&note.parent_id)?
        .map(|folder| folder.title)
        .unwrap_or_default())
}

/// Words given on the command line joined back into one string.
pub(crate) fn join_words(words: &[String]) -> String {
    words.join(" ").trim_end().to_string()
}
