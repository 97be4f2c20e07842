//! jn index - Maintain the derived search index

use std::time::Instant;

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::search::IndexMaintainer;

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(subcommand)]
    pub command: IndexCommand,
}

#[derive(Subcommand, Debug)]
pub enum IndexCommand {
    /// Drop and rebuild the index from every note
    Rebuild,

    /// Compare the index with the notes table
    Check,
}

pub fn run(ctx: &AppContext, args: &IndexArgs) -> Result<()> {
    match args.command {
        IndexCommand::Rebuild => rebuild(ctx),
        IndexCommand::Check => check(ctx),
    }
}

fn rebuild(ctx: &AppContext) -> Result<()> {
    let start = Instant::now();
    let indexed = IndexMaintainer::new(&ctx.db).rebuild_all()?;
    let elapsed = start.elapsed();

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "indexed": indexed,
            "elapsed_ms": u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }));
    }

    println!(
        "{} Indexed {} notes in {:.2?}",
        "✓".green().bold(),
        indexed,
        elapsed
    );
    Ok(())
}

fn check(ctx: &AppContext) -> Result<()> {
    let report = IndexMaintainer::new(&ctx.db).verify()?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "consistent": report.is_consistent(),
            "report": report,
        }));
    }

    let mut layout = HumanLayout::new();
    layout
        .section("Search index")
        .kv("table", if report.exists { "present" } else { "missing" })
        .kv("notes", &report.notes.to_string())
        .kv("entries", &report.entries.to_string())
        .kv("missing", &report.missing.len().to_string())
        .kv("orphaned", &report.orphaned.len().to_string())
        .kv("duplicated", &report.duplicated.len().to_string());

    for (label, ids) in [
        ("Missing from index", &report.missing),
        ("Orphaned entries", &report.orphaned),
        ("Duplicated entries", &report.duplicated),
    ] {
        if ids.is_empty() {
            continue;
        }
        layout.blank().section(label);
        for id in ids {
            layout.bullet(id);
        }
    }

    layout.blank();
    if report.is_consistent() {
        layout.push_line(format!("{} Index is consistent", "✓".green().bold()));
    } else {
        layout.push_line(format!(
            "{} Index is out of date, run `jn index rebuild`",
            "!".yellow().bold()
        ));
    }
    emit_human(layout);
    Ok(())
}
