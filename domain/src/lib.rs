//! Domain layer for switchboard
//!
//! This crate contains the query model: configuration trees, resolvers,
//! validators and the registry that names them. It has no dependencies on
//! infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Query
//!
//! A query is registered under a unique name and consists of:
//!
//! - **Configuration**: a [`ConfigNode`] tree of literals, resolvers and
//!   nested objects/lists, resolved fresh for every invocation
//! - **Validators**: an ordered list of [`Validator`]s that must all accept
//!   the resolved tree before the query is dispatched
//!
//! ## Invocation
//!
//! Every invocation carries its own [`InvocationParams`], which are handed
//! unchanged to each resolver and each validator.

pub mod core;
pub mod query;

// Re-export commonly used types
pub use core::{error::DomainError, params::InvocationParams};
pub use query::{
    config_node::{ConfigNode, escape_pointer},
    definition::QueryDefinition,
    registry::{QueryRegistry, QueryRegistryBuilder},
    resolver::{FnResolver, Resolver, ResolverError},
    validator::{FnValidator, Validator, Verdict},
};
pub use serde_json::Value;
