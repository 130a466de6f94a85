//! Infrastructure layer for switchboard
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, the built-in resolvers and validators, and query
//! file loading.

pub mod builtins;
pub mod config;
pub mod events;

// Re-export commonly used types
pub use builtins::{
    AllParamsResolver, EnvResolver, NonEmptyValidator, ParamCountValidator, ParamResolver,
    PatternValidator, RequiredValidator,
};
pub use config::{
    ConfigLoadError, ConfigLoader, FileConfig, FileOutputConfig, FileOutputFormat,
    FileQueryConfig, FileValidatorConfig,
};
pub use events::EventBus;
