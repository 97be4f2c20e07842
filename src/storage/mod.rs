//! Storage layer for jn
//!
//! A single SQLite connection serves both the canonical Joplin tables and the
//! derived full-text index.

pub mod notes;
pub mod schema;
pub mod sqlite;

pub use sqlite::Database;
