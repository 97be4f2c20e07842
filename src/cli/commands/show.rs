//! jn show - Print notes in the editor file format
//!
//! Several ids are printed in the order given; ids that do not resolve are
//! skipped with a warning. A single missing note is an error.

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::{join_words, notebook_title};
use crate::cli::output::emit_json;
use crate::core::document;
use crate::core::{Note, NoteRepository};
use crate::error::{JnError, Result};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Note ids
    #[arg(required_unless_present = "title", conflicts_with = "title")]
    pub ids: Vec<String>,

    /// Find the note by exact title instead
    #[arg(long, short, num_args = 1..)]
    pub title: Option<Vec<String>>,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let repo = NoteRepository::new(&ctx.db);
    let notes = resolve(&repo, args)?;

    if ctx.robot_mode {
        let notes = notes
            .iter()
            .map(|note| {
                Ok(serde_json::json!({
                    "note": note,
                    "notebook": notebook_title(&repo, note)?,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        return emit_json(&serde_json::json!({
            "status": "ok",
            "count": notes.len(),
            "notes": notes,
        }));
    }

    let mut first = true;
    for note in &notes {
        if !first {
            println!("\n");
        }
        first = false;
        print!("{}", document::render(note, &notebook_title(&repo, note)?));
    }
    println!();
    Ok(())
}

fn resolve(repo: &NoteRepository<'_>, args: &ShowArgs) -> Result<Vec<Note>> {
    if let Some(words) = &args.title {
        return Ok(vec![repo.find_by_title(&join_words(words))?]);
    }

    match args.ids.as_slice() {
        [] => Err(JnError::NoteNotFound("no id or title given".to_string())),
        [id] => Ok(vec![repo.get(id)?]),
        ids => {
            let notes = repo.db().get_notes(ids)?;
            for id in ids {
                if !notes.iter().any(|note| &note.id == id) {
                    tracing::warn!(note_id = %id, "no note with this id");
                }
            }
            Ok(notes)
        }
    }
}
