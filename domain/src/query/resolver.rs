//! Resolver functions embedded in a configuration tree.
//!
//! A resolver computes one configuration value from the invocation's
//! parameters. Its return value is final: it is never walked again as a
//! configuration tree, even when it is an object or an array.

use crate::core::params::InvocationParams;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a resolver function
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolverError {
    #[error("Parameter {index} was not supplied ({available} available)")]
    MissingParameter { index: usize, available: usize },

    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    #[error("{0}")]
    Failed(String),
}

impl ResolverError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// A callable configuration entry.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Produce the value for this entry from the invocation parameters
    async fn resolve(&self, params: &InvocationParams) -> Result<Value, ResolverError>;
}

/// Adapter turning a synchronous closure into a [`Resolver`]
pub struct FnResolver<F> {
    func: F,
}

impl<F> FnResolver<F>
where
    F: Fn(&InvocationParams) -> Result<Value, ResolverError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Resolver for FnResolver<F>
where
    F: Fn(&InvocationParams) -> Result<Value, ResolverError> + Send + Sync,
{
    async fn resolve(&self, params: &InvocationParams) -> Result<Value, ResolverError> {
        (self.func)(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_fn_resolver_reads_params() {
        let resolver = FnResolver::new(|params: &InvocationParams| {
            params.get(0).cloned().ok_or(ResolverError::MissingParameter {
                index: 0,
                available: params.len(),
            })
        });

        let params = InvocationParams::new(vec![json!("Alice")]);
        assert_eq!(resolver.resolve(&params).await, Ok(json!("Alice")));
    }

    #[tokio::test]
    async fn test_fn_resolver_propagates_error() {
        let resolver = FnResolver::new(|_: &InvocationParams| Err(ResolverError::failed("boom")));

        let result = resolver.resolve(&InvocationParams::empty()).await;
        assert_eq!(result, Err(ResolverError::Failed("boom".to_string())));
    }

    #[test]
    fn test_missing_parameter_display() {
        let error = ResolverError::MissingParameter {
            index: 2,
            available: 1,
        };
        assert_eq!(error.to_string(), "Parameter 2 was not supplied (1 available)");
    }
}
