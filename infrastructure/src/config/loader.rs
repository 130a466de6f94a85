//! Query file loader with multi-source merging

use super::error::ConfigLoadError;
use super::file_config::{FileConfig, FileOutputConfig};
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["switchboard.toml", ".switchboard.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided, must exist)
    /// 2. Project root: `./switchboard.toml` or `./.switchboard.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/switchboard/queries.toml`
    /// 4. Default values
    ///
    /// A query defined in several files is taken whole from the
    /// highest-priority one, so a project file can override a single global
    /// query without its markers mixing with the global definition.
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigLoadError> {
        let mut sources = Vec::new();

        if let Some(global_path) = Self::global_config_path().filter(|path| path.exists()) {
            debug!(path = %global_path.display(), "Merging global config");
            sources.push(global_path);
        }

        if let Some(path) = Self::project_config_path() {
            debug!(path = %path.display(), "Merging project config");
            sources.push(path);
        }

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigLoadError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Merging explicit config");
            sources.push(path.to_path_buf());
        }

        Self::merge_sources(&sources)
    }

    /// Merge files given lowest priority first. `[output]` merges field by
    /// field; queries are replaced by name.
    fn merge_sources(sources: &[PathBuf]) -> Result<FileConfig, ConfigLoadError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
        let mut queries = BTreeMap::new();

        for path in sources {
            let source: FileConfig = Figment::from(Toml::file(path))
                .extract()
                .map_err(|e| ConfigLoadError::from(Box::new(e)))?;
            queries.extend(source.queries);
            figment = figment.merge(Toml::file(path));
        }

        let output: FileOutputConfig = figment
            .extract_inner("output")
            .map_err(|e| ConfigLoadError::from(Box::new(e)))?;

        Ok(FileConfig { output, queries })
    }

    /// Load a single TOML document on top of the defaults
    pub fn load_str(toml: &str) -> Result<FileConfig, ConfigLoadError> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::string(toml))
            .extract()
            .map_err(|e| ConfigLoadError::from(Box::new(e)))
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/switchboard/queries.toml if set,
    /// otherwise the platform config directory equivalent
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("switchboard").join("queries.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn describe_sources(explicit: Option<&Path>) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if let Some(path) = explicit {
            let found = if path.exists() { "FOUND" } else { "MISSING" };
            lines.push(format!("  [{:^7}] Explicit: {}", found, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [ FOUND ] Project:  {}", path.display())),
            None => lines.push(format!(
                "  [       ] Project:  ./{} or ./{}",
                PROJECT_FILES[0], PROJECT_FILES[1]
            )),
        }

        if let Some(path) = Self::global_config_path() {
            let found = if path.exists() { " FOUND " } else { "       " };
            lines.push(format!("  [{}] Global:   {}", found, path.display()));
        }

        lines.push("  [       ] Default:  no queries".to_string());
        lines
    }
}
