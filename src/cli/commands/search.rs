//! jn search - Full-text search over notes

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::join_words;
use crate::cli::output::emit_json;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query; `t:`/`b:` restrict to title/body
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub query: Vec<String>,

    /// Maximum number of results (0 = unlimited, default from config)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Print only note ids, one per line
    #[arg(long)]
    pub ids: bool,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let raw = join_words(&args.query);
    let synonyms = ctx.load_synonyms()?;
    let service = ctx.search_service(&synonyms);
    let limit = args.limit.unwrap_or(ctx.config.search.limit);

    let hits = service.search(&ctx.db, &raw, limit)?;

    if ctx.robot_mode {
        return emit_json(&serde_json::json!({
            "status": "ok",
            "query": raw,
            "compiled": service.compiler().compile(&raw),
            "count": hits.len(),
            "hits": hits,
        }));
    }

    if args.ids {
        for hit in &hits {
            println!("{}", hit.id);
        }
        return Ok(());
    }

    if hits.is_empty() {
        println!("{}", "No matching notes".yellow());
        return Ok(());
    }

    for hit in &hits {
        println!("{} {}", hit.title.bold(), hit.id.dimmed());
        println!("{}", hit.snippet);
        println!();
    }
    Ok(())
}
