//! Presentation layer for switchboard
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat, parse_param, parse_params};
pub use output::{
    console::ConsoleFormatter,
    formatter::{OutputFormatter, QuerySummary},
    json::JsonFormatter,
};
