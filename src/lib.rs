//! jn - companion CLI for a local Joplin database
//!
//! Full-text search over notes (with column aliases and synonym expansion),
//! editor round-trips, and maintenance of the derived FTS5 index.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod editor;
pub mod error;
pub mod search;
pub mod storage;
pub mod test_utils;

pub use error::{JnError, Result};
