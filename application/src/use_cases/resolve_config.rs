//! Resolve Config use case
//!
//! Turns a [`ConfigNode`] tree into a plain [`Value`] tree for one invocation.
//!
//! Sibling entries of objects and lists do not depend on each other, so they
//! are resolved concurrently on the caller's task. The output keeps the shape
//! of the source: objects keep their key set, lists keep their length and
//! index order no matter in which order resolvers complete.

use futures::future::{BoxFuture, FutureExt, try_join_all};
use serde_json::{Map, Value};
use switchboard_domain::{ConfigNode, InvocationParams, ResolverError, escape_pointer};
use thiserror::Error;
use tracing::{debug, trace};

/// A resolver failed while resolving a configuration tree
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Resolver at {} failed: {source}", display_path(.path))]
pub struct ResolutionError {
    /// JSON pointer of the failing node (`""` for the root)
    pub path: String,
    pub source: ResolverError,
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "<root>" } else { path }
}

/// Use case for resolving configuration trees
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigResolver;

impl ConfigResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `node` against `params`.
    ///
    /// Fails only when a resolver fails; the first failure drops every
    /// sibling still in flight.
    pub async fn resolve(
        &self,
        node: &ConfigNode,
        params: &InvocationParams,
    ) -> Result<Value, ResolutionError> {
        debug!(
            resolvers = node.resolver_count(),
            params = params.len(),
            "Resolving configuration tree"
        );
        Self::resolve_at(node, params, String::new()).await
    }

    fn resolve_at<'a>(
        node: &'a ConfigNode,
        params: &'a InvocationParams,
        path: String,
    ) -> BoxFuture<'a, Result<Value, ResolutionError>> {
        async move {
            match node {
                ConfigNode::Literal(value) => Ok(value.clone()),
                ConfigNode::Resolver(resolver) => {
                    trace!(path = %display_path(&path), "Invoking resolver");
                    // The returned value is final, even if it is an object or array.
                    resolver
                        .resolve(params)
                        .await
                        .map_err(|source| ResolutionError { path, source })
                }
                ConfigNode::Object(entries) => {
                    let pending = entries.iter().map(|(key, child)| {
                        let child_path = format!("{}/{}", path, escape_pointer(key));
                        async move {
                            let value = Self::resolve_at(child, params, child_path).await?;
                            Ok::<_, ResolutionError>((key.clone(), value))
                        }
                    });
                    let resolved = try_join_all(pending).await?;
                    Ok(Value::Object(resolved.into_iter().collect::<Map<_, _>>()))
                }
                ConfigNode::List(items) => {
                    let pending = items.iter().enumerate().map(|(index, child)| {
                        Self::resolve_at(child, params, format!("{}/{}", path, index))
                    });
                    Ok(Value::Array(try_join_all(pending).await?))
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use switchboard_domain::Resolver;

    /// Resolver that sleeps before answering and records when it ran
    struct DelayedResolver {
        label: &'static str,
        delay_ms: u64,
        events: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Resolver for DelayedResolver {
        async fn resolve(&self, _params: &InvocationParams) -> Result<Value, ResolverError> {
            self.events.lock().unwrap().push(format!("start:{}", self.label));
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            self.events.lock().unwrap().push(format!("end:{}", self.label));
            Ok(json!(self.label))
        }
    }

    fn param(index: usize) -> ConfigNode {
        ConfigNode::resolver_fn(move |params: &InvocationParams| {
            params
                .get(index)
                .cloned()
                .ok_or(ResolverError::MissingParameter {
                    index,
                    available: params.len(),
                })
        })
    }

    #[tokio::test]
    async fn test_resolve_create_user_scenario() {
        let config = ConfigNode::object([("name", param(0))]);
        let params = InvocationParams::new(vec![json!("Alice")]);

        let resolved = ConfigResolver::new().resolve(&config, &params).await.unwrap();
        assert_eq!(resolved, json!({"name": "Alice"}));
    }

    #[tokio::test]
    async fn test_literal_returned_unchanged() {
        let config = ConfigNode::literal(json!("static"));
        let params = InvocationParams::new(vec![json!("ignored")]);

        let resolved = ConfigResolver::new().resolve(&config, &params).await.unwrap();
        assert_eq!(resolved, json!("static"));
    }

    #[tokio::test]
    async fn test_object_preserves_key_set() {
        let config = ConfigNode::object([
            ("a", param(0)),
            ("b", ConfigNode::literal(2)),
            ("c", ConfigNode::from(json!({"deep": [1, 2]}))),
        ]);
        let params = InvocationParams::new(vec![json!(1)]);

        let resolved = ConfigResolver::new().resolve(&config, &params).await.unwrap();
        let keys: Vec<&String> = resolved.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(resolved, json!({"a": 1, "b": 2, "c": {"deep": [1, 2]}}));
    }

    #[tokio::test]
    async fn test_list_preserves_order_despite_completion_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let delayed = |label, delay_ms| {
            ConfigNode::resolver(DelayedResolver {
                label,
                delay_ms,
                events: Arc::clone(&events),
            })
        };
        let config = ConfigNode::list([delayed("slow", 40), delayed("fast", 5), delayed("mid", 20)]);

        let resolved = ConfigResolver::new()
            .resolve(&config, &InvocationParams::empty())
            .await
            .unwrap();

        assert_eq!(resolved, json!(["slow", "fast", "mid"]));

        // All siblings start before any of them finishes
        let events = events.lock().unwrap();
        assert!(events[..3].iter().all(|e| e.starts_with("start:")));
        assert_eq!(events[3], "end:fast");
    }

    #[tokio::test]
    async fn test_resolver_output_is_not_reentered() {
        let config = ConfigNode::object([(
            "raw",
            ConfigNode::resolver_fn(|_| Ok(json!({"looks": ["like", "config"]}))),
        )]);

        let resolved = ConfigResolver::new()
            .resolve(&config, &InvocationParams::empty())
            .await
            .unwrap();
        assert_eq!(resolved, json!({"raw": {"looks": ["like", "config"]}}));
    }

    #[tokio::test]
    async fn test_nested_resolvers_see_same_params() {
        let config = ConfigNode::object([(
            "user",
            ConfigNode::object([
                ("first", param(0)),
                ("emails", ConfigNode::list([param(1), param(0)])),
            ]),
        )]);
        let params = InvocationParams::new(vec![json!("a"), json!("b")]);

        let resolved = ConfigResolver::new().resolve(&config, &params).await.unwrap();
        assert_eq!(resolved, json!({"user": {"first": "a", "emails": ["b", "a"]}}));
    }

    #[tokio::test]
    async fn test_failure_reports_path() {
        let config = ConfigNode::object([(
            "user",
            ConfigNode::object([("emails", ConfigNode::list([param(0), param(3)]))]),
        )]);
        let params = InvocationParams::new(vec![json!("a")]);

        let error = ConfigResolver::new()
            .resolve(&config, &params)
            .await
            .unwrap_err();
        assert_eq!(error.path, "/user/emails/1");
        assert_eq!(
            error.source,
            ResolverError::MissingParameter {
                index: 3,
                available: 1
            }
        );
        assert_eq!(
            error.to_string(),
            "Resolver at /user/emails/1 failed: Parameter 3 was not supplied (1 available)"
        );
    }

    #[tokio::test]
    async fn test_root_resolver_failure() {
        let config = ConfigNode::resolver_fn(|_| Err(ResolverError::failed("down")));

        let error = ConfigResolver::new()
            .resolve(&config, &InvocationParams::empty())
            .await
            .unwrap_err();
        assert_eq!(error.path, "");
        assert_eq!(error.to_string(), "Resolver at <root> failed: down");
    }
}
