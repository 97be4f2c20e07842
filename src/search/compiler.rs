//! Query compiler: raw user query → FTS5 match expression.
//!
//! The query is split into whitespace-preserving segments and two rule passes
//! run over the word segments:
//!
//! 1. column aliases: a word starting with `t:` or `b:` gets the full column
//!    qualifier (`title:` / `body:`);
//! 2. synonyms: a word found in the [`SynonymTable`] becomes a parenthesized
//!    `OR` group of every member, e.g. `py` → `(py OR python)`.
//!
//! Whitespace is copied through untouched, so a query with neither aliases nor
//! synonyms compiles to itself.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::search::synonyms::SynonymTable;

/// Single-letter column aliases and their FTS5 column qualifiers.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[("t:", "title:"), ("b:", "body:")];

const OR_JOINER: &str = " OR ";

/// Member ordering inside an expanded synonym group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionOrder {
    /// Always the group's declared order, whichever member was typed.
    #[default]
    Declared,
    /// The typed keyword first, then the other members in declared order.
    TypedFirst,
}

impl std::str::FromStr for ExpansionOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "declared" => Ok(Self::Declared),
            "typed_first" | "typed-first" | "typedfirst" => Ok(Self::TypedFirst),
            other => Err(format!(
                "invalid expansion order {other} (expected declared|typed_first)"
            )),
        }
    }
}

/// A query ready for the FTS5 `MATCH` operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledQuery(String);

impl CompiledQuery {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// True when the query has no searchable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'q> {
    Space(&'q str),
    Word(&'q str),
}

/// Split into alternating runs of whitespace and non-whitespace.
fn tokenize(query: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (idx, ch) in query.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(prev) if prev != is_space => {
                segments.push(make_segment(&query[start..idx], prev));
                start = idx;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if let Some(prev) = in_space {
        segments.push(make_segment(&query[start..], prev));
    }
    segments
}

const fn make_segment(text: &str, is_space: bool) -> Segment<'_> {
    if is_space {
        Segment::Space(text)
    } else {
        Segment::Word(text)
    }
}

/// Compiles raw queries against an injected synonym table.
#[derive(Debug, Clone, Copy)]
pub struct QueryCompiler<'t> {
    synonyms: &'t SynonymTable,
    order: ExpansionOrder,
}

impl<'t> QueryCompiler<'t> {
    #[must_use]
    pub const fn new(synonyms: &'t SynonymTable) -> Self {
        Self {
            synonyms,
            order: ExpansionOrder::Declared,
        }
    }

    #[must_use]
    pub const fn with_order(mut self, order: ExpansionOrder) -> Self {
        self.order = order;
        self
    }

    /// Run both passes over `raw`.
    #[must_use]
    pub fn compile(&self, raw: &str) -> CompiledQuery {
        let mut out = String::with_capacity(raw.len());
        for segment in tokenize(raw) {
            match segment {
                Segment::Space(space) => out.push_str(space),
                Segment::Word(word) => {
                    let word = substitute_alias(word);
                    out.push_str(&self.expand_synonyms(word));
                }
            }
        }
        CompiledQuery(out)
    }

    fn expand_synonyms<'w>(&self, word: Cow<'w, str>) -> Cow<'w, str> {
        let Some(group) = self.synonyms.group_for(&word) else {
            return word;
        };

        let members = group.members();
        let expanded = match self.order {
            ExpansionOrder::Declared => members.join(OR_JOINER),
            ExpansionOrder::TypedFirst => {
                let typed = word.as_ref();
                std::iter::once(typed)
                    .chain(
                        members
                            .iter()
                            .map(String::as_str)
                            .filter(|member| !self.same_keyword(member, typed)),
                    )
                    .collect::<Vec<_>>()
                    .join(OR_JOINER)
            }
        };
        Cow::Owned(format!("({expanded})"))
    }

    fn same_keyword(&self, a: &str, b: &str) -> bool {
        if self.synonyms.is_case_insensitive() {
            a.to_lowercase() == b.to_lowercase()
        } else {
            a == b
        }
    }
}

/// Pass 1: a word that begins with an alias gets the full column qualifier.
fn substitute_alias(word: &str) -> Cow<'_, str> {
    for (alias, column) in COLUMN_ALIASES {
        if let Some(rest) = word.strip_prefix(alias) {
            return Cow::Owned(format!("{column}{rest}"));
        }
    }
    Cow::Borrowed(word)
}
