//! jn lucky - Jump straight to the useful part of a note
//!
//! Prints the first code stub under a "Solution" heading. Notes without one
//! are opened in the editor instead.

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::core::lucky::extract_stub;
use crate::error::Result;
use crate::search::SearchIndexer;

#[derive(Args, Debug)]
pub struct LuckyArgs {
    /// Note id
    pub id: String,

    /// Report a missing stub instead of opening the editor
    #[arg(long)]
    pub no_edit: bool,
}

pub fn run(ctx: &AppContext, args: &LuckyArgs) -> Result<()> {
    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);
    let note = repo.get(&args.id)?;

    let stub = extract_stub(&note.body);

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "id": note.id,
            "title": note.title,
            "stub": stub,
        }));
    }

    match stub {
        Some(stub) => {
            println!("{stub}");
            Ok(())
        }
        None if args.no_edit => {
            eprintln!("No code stub found in '{}'", note.title);
            Ok(())
        }
        None => {
            tracing::info!(note_id = %note.id, "no code stub found, opening the note");
            ctx.editor().edit(&repo, note)?;
            Ok(())
        }
    }
}
