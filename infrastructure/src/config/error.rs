//! Errors raised while loading a query file

use std::path::PathBuf;
use switchboard_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read configuration: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Query \"{query}\": invalid marker at {path}: {message}")]
    InvalidMarker {
        query: String,
        path: String,
        message: String,
    },

    #[error("Query \"{query}\": \"{pointer}\" is not a JSON pointer (must be empty or start with '/')")]
    InvalidPointer { query: String, pointer: String },

    #[error("Query \"{query}\": invalid pattern: {source}")]
    InvalidPattern {
        query: String,
        source: regex::Error,
    },

    #[error(transparent)]
    Registry(#[from] DomainError),
}
