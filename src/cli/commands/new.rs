//! jn new - Create a note

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::join_words;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::search::SearchIndexer;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Note title
    #[arg(required = true, num_args = 1..)]
    pub title: Vec<String>,

    /// Notebook name (default from config)
    #[arg(long, short)]
    pub notebook: Option<String>,

    /// Initial body
    #[arg(long, short, default_value = "")]
    pub body: String,

    /// Open the new note in the editor
    #[arg(long, short)]
    pub edit: bool,
}

pub fn run(ctx: &AppContext, args: &NewArgs) -> Result<()> {
    let title = join_words(&args.title);
    let notebook = args.notebook.clone().unwrap_or_else(|| {
        if args.edit {
            ctx.config.notes.new_and_edit_notebook.clone()
        } else {
            ctx.config.notes.default_notebook.clone()
        }
    });

    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);
    let note = repo.create(&title, &notebook, &args.body)?;

    if !ctx.robot_mode {
        println!(
            "{} Created '{}' in {} ({})",
            "✓".green().bold(),
            note.title,
            notebook.cyan(),
            note.id.dimmed()
        );
    }

    let outcome = if args.edit {
        Some(ctx.editor().edit(&repo, note.clone())?)
    } else {
        None
    };

    if ctx.robot_mode {
        emit_json(&serde_json::json!({
            "status": "ok",
            "id": note.id,
            "title": note.title,
            "notebook": notebook,
            "edit": outcome.map(|o| o.as_str()),
        }))?;
    } else if let Some(outcome) = outcome {
        println!("{} Edit finished: {}", "✓".green().bold(), outcome.as_str());
    }
    Ok(())
}
