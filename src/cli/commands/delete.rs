//! jn delete - Delete a note

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::search::SearchIndexer;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Note id
    pub id: String,
}

pub fn run(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);

    let note = repo.get(&args.id)?;
    repo.delete(&note)?;

    if ctx.robot_mode {
        emit_json(&serde_json::json!({
            "status": "ok",
            "id": note.id,
            "title": note.title,
            "index_failures": indexer.failures(),
        }))
    } else {
        println!("{} Deleted '{}'", "✓".green().bold(), note.title);
        Ok(())
    }
}
