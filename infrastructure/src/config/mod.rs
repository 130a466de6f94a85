//! Query file loading for switchboard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./switchboard.toml` or `./.switchboard.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/switchboard/queries.toml`
//! 4. Default values (no queries)

mod error;
mod file_config;
mod loader;

pub use error::ConfigLoadError;
pub use file_config::{
    FileConfig, FileOutputConfig, FileOutputFormat, FileQueryConfig, FileValidatorConfig,
};
pub use loader::ConfigLoader;
