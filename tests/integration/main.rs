//! Library-level integration tests: repository, index and config working
//! together against real database files.

mod config_tests;
mod db_state_tests;
mod repository_tests;
