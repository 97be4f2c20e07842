//! jn conflicts - Inspect notes flagged as sync conflicts

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::emit_json;
use crate::error::Result;
use crate::search::SearchIndexer;

/// Suffix that marks a conflict copy in its title.
pub const CONFLICT_SUFFIX: &str = " (CONFLICT)";

#[derive(Args, Debug)]
pub struct ConflictsArgs {
    #[command(subcommand)]
    pub command: ConflictsCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConflictsCommand {
    /// List conflict notes
    List,

    /// Append " (CONFLICT)" to conflict notes that lack it
    Rename,
}

pub fn run(ctx: &AppContext, args: &ConflictsArgs) -> Result<()> {
    match args.command {
        ConflictsCommand::List => list(ctx),
        ConflictsCommand::Rename => rename(ctx),
    }
}

fn list(ctx: &AppContext) -> Result<()> {
    let notes = ctx.db.conflict_notes()?;

    if ctx.robot_mode {
        let listed: Vec<_> = notes
            .iter()
            .map(|note| serde_json::json!({ "id": note.id, "title": note.title }))
            .collect();
        return emit_json(&serde_json::json!({
            "status": "ok",
            "count": listed.len(),
            "notes": listed,
        }));
    }

    if notes.is_empty() {
        println!("{}", "No conflicting notes".green());
        return Ok(());
    }
    println!("{}", "Conflicting notes:".bold());
    for note in &notes {
        println!("{} {}", note.id.dimmed(), note.title);
    }
    Ok(())
}

fn rename(ctx: &AppContext) -> Result<()> {
    let indexer = SearchIndexer::new();
    let repo = ctx.repository(&indexer);

    let mut renamed = Vec::new();
    for mut note in ctx.db.conflict_notes()? {
        if needs_suffix(&note.title) {
            note.title.push_str(CONFLICT_SUFFIX);
            repo.save(&mut note)?;
            renamed.push(note);
        }
    }

    if ctx.robot_mode {
        let listed: Vec<_> = renamed
            .iter()
            .map(|note| serde_json::json!({ "id": note.id, "title": note.title }))
            .collect();
        return emit_json(&serde_json::json!({
            "status": "ok",
            "renamed": listed,
        }));
    }

    for note in &renamed {
        println!("{} {}", "✓".green().bold(), note.title);
    }
    println!("Renamed {} conflicting notes", renamed.len());
    Ok(())
}

fn needs_suffix(title: &str) -> bool {
    !title.ends_with("(CONFLICT)")
}
