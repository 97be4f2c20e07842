//! Search over notes.
//!
//! Raw queries go through the [`QueryCompiler`] (column aliases, synonym
//! expansion) and run against the FTS5 projection kept by [`IndexMaintainer`].

pub mod compiler;
pub mod index;
pub mod service;
pub mod synonyms;

pub use compiler::{CompiledQuery, ExpansionOrder, QueryCompiler};
pub use index::{ConsistencyReport, INDEX_TABLE, IndexMaintainer, SearchIndexer};
pub use service::{SearchHit, SearchService, SnippetStyle};
pub use synonyms::{SynonymGroup, SynonymTable};
