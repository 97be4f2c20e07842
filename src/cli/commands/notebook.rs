//! jn notebook - Look up a notebook by name

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::join_words;
use crate::cli::output::emit_json;
use crate::core::NoteRepository;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct NotebookArgs {
    /// Notebook name
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &NotebookArgs) -> Result<()> {
    let folder = NoteRepository::new(&ctx.db).notebook_by_title(&join_words(&args.name))?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "notebook": folder,
        }));
    }
    println!("{}", folder.id);
    println!("{}", folder.title);
    Ok(())
}
