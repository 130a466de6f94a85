//! Declarative query configuration trees.
//!
//! A [`ConfigNode`] is classified once, when the query is registered, so that
//! resolution never has to inspect the runtime shape of a value again:
//!
//! | variant    | resolves to                                   |
//! |------------|-----------------------------------------------|
//! | `Literal`  | the value itself, untouched                   |
//! | `Resolver` | whatever the resolver returns for the params  |
//! | `Object`   | an object with the identical key set          |
//! | `List`     | an array of the same length and order         |

use super::resolver::{FnResolver, Resolver, ResolverError};
use crate::core::params::InvocationParams;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub enum ConfigNode {
    Literal(Value),
    Resolver(Arc<dyn Resolver>),
    Object(BTreeMap<String, ConfigNode>),
    List(Vec<ConfigNode>),
}

impl ConfigNode {
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    pub fn resolver<R: Resolver + 'static>(resolver: R) -> Self {
        Self::Resolver(Arc::new(resolver))
    }

    /// Wrap a synchronous closure as a resolver entry
    pub fn resolver_fn<F>(func: F) -> Self
    where
        F: Fn(&InvocationParams) -> Result<Value, ResolverError> + Send + Sync + 'static,
    {
        Self::resolver(FnResolver::new(func))
    }

    /// Build an object node from `(key, node)` pairs
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, ConfigNode)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }

    pub fn list(items: impl IntoIterator<Item = ConfigNode>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Number of resolver entries anywhere in this tree
    pub fn resolver_count(&self) -> usize {
        match self {
            ConfigNode::Literal(_) => 0,
            ConfigNode::Resolver(_) => 1,
            ConfigNode::Object(entries) => entries.values().map(Self::resolver_count).sum(),
            ConfigNode::List(items) => items.iter().map(Self::resolver_count).sum(),
        }
    }

    /// True when the tree contains no resolver, so it resolves to itself
    pub fn is_static(&self) -> bool {
        self.resolver_count() == 0
    }
}

/// Escape an object key as a JSON pointer segment (RFC 6901)
pub fn escape_pointer(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

impl From<Value> for ConfigNode {
    /// Classify a plain JSON value by shape. Plain values never become
    /// resolvers; those are only created explicitly.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, ConfigNode::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::List(items.into_iter().map(ConfigNode::from).collect()),
            other => Self::Literal(other),
        }
    }
}

impl fmt::Debug for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigNode::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            ConfigNode::Resolver(_) => f.write_str("Resolver(..)"),
            ConfigNode::Object(entries) => f.debug_map().entries(entries.iter()).finish(),
            ConfigNode::List(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}
