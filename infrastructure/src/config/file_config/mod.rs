//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML query file.
//! They are deserialized directly and converted into domain types by
//! [`FileConfig::to_registry`].

mod output;
mod query;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use query::{FileQueryConfig, FileValidatorConfig};

use super::error::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use switchboard_domain::QueryRegistry;
use tracing::debug;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Output settings
    pub output: FileOutputConfig,
    /// Query name → definition
    pub queries: BTreeMap<String, FileQueryConfig>,
}

impl FileConfig {
    /// Build the query registry, validating markers, pointers and patterns.
    ///
    /// Fails on the first invalid query.
    pub fn to_registry(&self) -> Result<QueryRegistry, ConfigLoadError> {
        let mut builder = QueryRegistry::builder();
        for (name, query) in &self.queries {
            let definition = query.to_definition(name)?;
            debug!(
                query = %name,
                validators = definition.validators().len(),
                resolvers = definition.config().resolver_count(),
                "Loaded query"
            );
            builder = builder.register(name.clone(), definition);
        }
        Ok(builder.build()?)
    }
}
