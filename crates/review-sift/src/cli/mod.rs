//! CLI subcommand implementations for the review-sift binary.

pub mod doctor;
pub mod output;
pub mod repl;
pub mod search_cmd;
pub mod sources_cmd;
