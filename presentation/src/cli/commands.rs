//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use std::path::PathBuf;
use switchboard_domain::InvocationParams;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for switchboard
#[derive(Parser, Debug)]
#[command(name = "switchboard")]
#[command(author, version, about = "Named-query dispatcher with validation-gated notifications")]
#[command(long_about = r#"
Switchboard dispatches named queries. Each query resolves its configuration
tree against the parameters you pass, runs its validators, and only notifies
listeners if every validator accepts the result.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit query file
2. ./switchboard.toml       Project-level queries
3. ~/.config/switchboard/queries.toml   Global queries

Example:
  switchboard send createUser Alice alice@example.com admin
  switchboard send createUser '""' alice@example.com admin   # rejected: name required
  switchboard resolve createUser Alice alice@example.com admin --output json
  switchboard list
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format (defaults to the config file's [output] format, then text)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Path to query file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch a query; parameters are parsed as JSON, falling back to strings
    Send {
        /// Registered query name
        query: String,
        /// Positional parameters
        params: Vec<String>,
    },
    /// Resolve a query's configuration without validating or dispatching
    Resolve {
        /// Registered query name
        query: String,
        /// Positional parameters
        params: Vec<String>,
    },
    /// List registered queries
    List,
    /// Show configuration file locations
    ShowConfig,
}

/// Parse one command-line parameter: valid JSON is taken as-is, anything
/// else becomes a JSON string
pub fn parse_param(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parse all positional parameters of a command
pub fn parse_params(raw: &[String]) -> InvocationParams {
    raw.iter().map(|param| parse_param(param)).collect()
}
