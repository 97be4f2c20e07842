//! Ranked search over the FTS5 index.

use rusqlite::params;
use serde::Serialize;

use crate::error::Result;
use crate::search::compiler::QueryCompiler;
use crate::search::index::INDEX_TABLE;
use crate::storage::Database;

/// One ranked match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub snippet: String,
    /// bm25 score; lower is more relevant.
    pub rank: f64,
}

/// Markers and window size passed to FTS5 `snippet()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetStyle {
    pub start: String,
    pub end: String,
    pub ellipsis: String,
    pub tokens: u32,
}

impl Default for SnippetStyle {
    fn default() -> Self {
        Self {
            start: "[".to_string(),
            end: "]".to_string(),
            ellipsis: "...".to_string(),
            tokens: 15,
        }
    }
}

/// Compiles a raw query and runs it against the index.
#[derive(Debug, Clone)]
pub struct SearchService<'t> {
    compiler: QueryCompiler<'t>,
    snippet: SnippetStyle,
}

impl<'t> SearchService<'t> {
    #[must_use]
    pub fn new(compiler: QueryCompiler<'t>) -> Self {
        Self {
            compiler,
            snippet: SnippetStyle::default(),
        }
    }

    #[must_use]
    pub fn with_snippet(mut self, snippet: SnippetStyle) -> Self {
        self.snippet = snippet;
        self
    }

    #[must_use]
    pub const fn compiler(&self) -> &QueryCompiler<'t> {
        &self.compiler
    }

    /// Search for `raw`, most relevant first. `limit` of 0 means no limit.
    ///
    /// Runs in a single read transaction so it never observes a half-applied
    /// index write.
    pub fn search(&self, db: &Database, raw: &str, limit: usize) -> Result<Vec<SearchHit>> {
        let query = self.compiler.compile(raw);
        if query.is_blank() {
            return Ok(Vec::new());
        }
        tracing::debug!(raw, compiled = %query, limit, "running search");

        let limit = if limit == 0 {
            -1
        } else {
            i64::try_from(limit).unwrap_or(i64::MAX)
        };

        db.in_read_transaction(|db| {
            let sql = format!(
                "SELECT uid, title, snippet({INDEX_TABLE}, -1, ?2, ?3, ?4, ?5), bm25({INDEX_TABLE}) \
                 FROM {INDEX_TABLE} WHERE {INDEX_TABLE} MATCH ?1 \
                 ORDER BY bm25({INDEX_TABLE}) LIMIT ?6"
            );
            let mut stmt = db.conn().prepare(&sql)?;
            let hits = stmt
                .query_map(
                    params![
                        query.as_str(),
                        self.snippet.start,
                        self.snippet.end,
                        self.snippet.ellipsis,
                        self.snippet.tokens,
                        limit
                    ],
                    |row| {
                        Ok(SearchHit {
                            id: row.get(0)?,
                            title: row.get(1)?,
                            snippet: row.get(2)?,
                            rank: row.get(3)?,
                        })
                    },
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(hits)
        })
    }
}
