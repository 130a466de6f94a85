//! Built-in resolvers available to query files.

use async_trait::async_trait;
use serde_json::Value;
use switchboard_domain::{InvocationParams, Resolver, ResolverError};

/// Returns the parameter at a fixed position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamResolver {
    index: usize,
}

impl ParamResolver {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}

#[async_trait]
impl Resolver for ParamResolver {
    async fn resolve(&self, params: &InvocationParams) -> Result<Value, ResolverError> {
        params
            .get(self.index)
            .cloned()
            .ok_or(ResolverError::MissingParameter {
                index: self.index,
                available: params.len(),
            })
    }
}

/// Returns every parameter as an array
#[derive(Debug, Clone, Copy, Default)]
pub struct AllParamsResolver;

#[async_trait]
impl Resolver for AllParamsResolver {
    async fn resolve(&self, params: &InvocationParams) -> Result<Value, ResolverError> {
        Ok(params.to_value())
    }
}

/// Reads an environment variable at invocation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvResolver {
    name: String,
}

impl EnvResolver {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Resolver for EnvResolver {
    async fn resolve(&self, _params: &InvocationParams) -> Result<Value, ResolverError> {
        std::env::var(&self.name)
            .map(Value::String)
            .map_err(|_| ResolverError::MissingEnv(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_param_resolver() {
        let params = InvocationParams::new(vec![json!("a"), json!({"b": 1})]);
        assert_eq!(ParamResolver::new(1).resolve(&params).await, Ok(json!({"b": 1})));
        assert_eq!(
            ParamResolver::new(2).resolve(&params).await,
            Err(ResolverError::MissingParameter {
                index: 2,
                available: 2
            })
        );
    }

    #[tokio::test]
    async fn test_all_params_resolver() {
        let params = InvocationParams::new(vec![json!(1), json!(2)]);
        assert_eq!(AllParamsResolver.resolve(&params).await, Ok(json!([1, 2])));
    }

    #[tokio::test]
    async fn test_env_resolver() {
        // PATH is set in every test environment we run in
        let path = EnvResolver::new("PATH")
            .resolve(&InvocationParams::empty())
            .await;
        assert!(matches!(path, Ok(Value::String(_))));

        let missing = EnvResolver::new("SWITCHBOARD_SURELY_UNSET_VARIABLE")
            .resolve(&InvocationParams::empty())
            .await;
        assert_eq!(
            missing,
            Err(ResolverError::MissingEnv(
                "SWITCHBOARD_SURELY_UNSET_VARIABLE".to_string()
            ))
        );
    }
}
