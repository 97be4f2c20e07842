//! Property tests for the query compiler.
