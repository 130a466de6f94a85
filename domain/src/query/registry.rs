//! Query registry
//!
//! Maps unique query names to their [`QueryDefinition`]. The registry is
//! assembled once through [`QueryRegistryBuilder`] and is read-only afterwards,
//! so it can be shared between concurrent invocations without locking.

use super::definition::QueryDefinition;
use crate::core::error::DomainError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct QueryRegistry {
    queries: HashMap<String, QueryDefinition>,
}

impl QueryRegistry {
    pub fn builder() -> QueryRegistryBuilder {
        QueryRegistryBuilder::default()
    }

    pub fn get(&self, name: &str) -> Option<&QueryDefinition> {
        self.queries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.queries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryDefinition)> {
        self.queries.iter().map(|(name, def)| (name.as_str(), def))
    }
}

/// Collects definitions and rejects empty or duplicate names
#[derive(Debug, Default)]
pub struct QueryRegistryBuilder {
    queries: HashMap<String, QueryDefinition>,
    error: Option<DomainError>,
}

impl QueryRegistryBuilder {
    /// Register a query. The first invalid registration is reported by
    /// [`build`](Self::build).
    pub fn register(mut self, name: impl Into<String>, definition: QueryDefinition) -> Self {
        if self.error.is_some() {
            return self;
        }

        let name = name.into();
        if name.trim().is_empty() {
            self.error = Some(DomainError::EmptyQueryName);
        } else if self.queries.contains_key(&name) {
            self.error = Some(DomainError::DuplicateQuery(name));
        } else {
            self.queries.insert(name, definition);
        }
        self
    }

    pub fn build(self) -> Result<QueryRegistry, DomainError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(QueryRegistry {
                queries: self.queries,
            }),
        }
    }
}
