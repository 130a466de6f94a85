//! Query subdomain
//!
//! - [`config_node::ConfigNode`] — declarative configuration tree
//! - [`resolver::Resolver`] — callable configuration entries
//! - [`validator::Validator`] — predicates over resolved trees
//! - [`definition::QueryDefinition`] — validators plus configuration
//! - [`registry::QueryRegistry`] — name → definition lookup

pub mod config_node;
pub mod definition;
pub mod registry;
pub mod resolver;
pub mod validator;
