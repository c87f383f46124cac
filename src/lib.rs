//! diffscribe: AI code reviews and commit messages from git diffs (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod commands;
pub mod config;
pub mod constants;
pub mod diff;
pub mod env;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod providers;
