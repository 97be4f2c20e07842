//! jn empty - Find notes with an empty body
//!
//! Sync hiccups occasionally leave a note with its title but no content.

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::search::SearchIndexer;

#[derive(Args, Debug)]
pub struct EmptyArgs {
    /// Delete the notes that are found
    #[arg(long)]
    pub delete: bool,
}

pub fn run(ctx: &AppContext, args: &EmptyArgs) -> Result<()> {
    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);
    let notes = ctx.db.empty_notes()?;

    if args.delete {
        for note in &notes {
            repo.delete(note)?;
        }
    }

    if ctx.robot_mode {
        let listed: Vec<_> = notes
            .iter()
            .map(|note| serde_json::json!({ "id": note.id, "title": note.title }))
            .collect();
        return emit_json(&serde_json::json!({
            "status": "ok",
            "count": listed.len(),
            "deleted": args.delete,
            "notes": listed,
        }));
    }

    if notes.is_empty() {
        println!("{}", "No empty notes".green());
        return Ok(());
    }

    println!("{}", "Empty notes:".bold());
    for note in &notes {
        println!("{} {}", note.id.dimmed(), note.title);
    }
    if args.delete {
        println!("{} Deleted {} notes", "✓".green().bold(), notes.len());
    }
    Ok(())
}
