//! jn edit - Edit a note in the external editor

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::join_words;
use crate::cli::output::emit_json;
use crate::editor::EditOutcome;
use crate::error::{JnError, Result};
use crate::search::SearchIndexer;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Note id
    #[arg(required_unless_present = "title", conflicts_with = "title")]
    pub id: Option<String>,

    /// Find the note by exact title instead
    #[arg(long, short, num_args = 1..)]
    pub title: Option<Vec<String>>,
}

pub fn run(ctx: &AppContext, args: &EditArgs) -> Result<()> {
    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);

    let note = match (&args.id, &args.title) {
        (Some(id), _) => repo.get(id)?,
        (None, Some(words)) => repo.find_by_title(&join_words(words))?,
        (None, None) => return Err(JnError::NoteNotFound("no id or title given".to_string())),
    };
    let id = note.id.clone();
    let title = note.title.clone();

    let outcome = ctx.editor().edit(&repo, note)?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "id": id,
            "outcome": outcome.as_str(),
        }));
    }

    match outcome {
        EditOutcome::Unchanged => println!("{} No changes to '{title}'", "-".dimmed()),
        EditOutcome::Saved => println!("{} Saved '{title}'", "✓".green().bold()),
        EditOutcome::Deleted => println!("{} Deleted empty note '{title}'", "✓".green().bold()),
    }
    Ok(())
}
