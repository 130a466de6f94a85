//! Dispatch Query use case
//!
//! Looks up a named query, resolves its configuration, runs its validators
//! and either emits a [`Notification`] to the sink or hands the first
//! validation error to the caller's failure callback.
//!
//! Validators run concurrently, but the reported failure is always the first
//! invalid verdict in declared order, regardless of which settles first.

use crate::ports::notification_sink::{Callbacks, Listener, Notification, NotificationSink};
use crate::use_cases::resolve_config::{ConfigResolver, ResolutionError};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use switchboard_domain::{InvocationParams, QueryRegistry, Validator, Verdict};
use thiserror::Error;
use tracing::{debug, info};

/// Hard failures of a dispatch. Validation failures are not errors; they are
/// delivered through the failure callback.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("There is no query with the name \"{0}\".")]
    UnknownQuery(String),

    #[error("Failed to resolve query \"{query}\": {source}")]
    Resolution {
        query: String,
        source: ResolutionError,
    },
}

impl DispatchError {
    /// The caller asked for a query that is not registered
    pub fn is_unknown_query(&self) -> bool {
        matches!(self, DispatchError::UnknownQuery(_))
    }

    /// A resolver in the query's configuration failed
    pub fn is_resolution(&self) -> bool {
        matches!(self, DispatchError::Resolution { .. })
    }
}

/// How a successful `send` settled
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    /// Validation passed and the notification went to this many listeners
    Emitted { listeners: usize },
    /// A validator rejected the resolved tree; the failure callback received `error`
    Rejected { validator_index: usize, error: Value },
}

impl SendOutcome {
    pub fn is_emitted(&self) -> bool {
        matches!(self, SendOutcome::Emitted { .. })
    }
}

/// Use case for dispatching named queries
pub struct Dispatcher<S: NotificationSink> {
    registry: Arc<QueryRegistry>,
    resolver: ConfigResolver,
    sink: Arc<S>,
}

impl<S: NotificationSink> Dispatcher<S> {
    pub fn new(registry: Arc<QueryRegistry>, sink: Arc<S>) -> Self {
        Self {
            registry,
            resolver: ConfigResolver::new(),
            sink,
        }
    }

    pub fn registry(&self) -> &QueryRegistry {
        &self.registry
    }

    /// Subscribe business logic to a query name (delegates to the sink)
    pub fn on<F>(&self, query: &str, listener: F)
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(listener);
        self.sink.on(query, listener);
    }

    /// Number of listeners subscribed to `query`
    pub fn listener_count(&self, query: &str) -> usize {
        self.sink.listener_count(query)
    }

    /// Invoke `query` with `params`.
    ///
    /// Unknown queries are rejected before any resolver or validator runs and
    /// without touching the callbacks. Resolver failures are returned as
    /// errors as well. Otherwise the call settles after either the failure
    /// callback has been invoked once or the notification has been emitted.
    pub async fn send(
        &self,
        query: &str,
        callbacks: Callbacks,
        params: InvocationParams,
    ) -> Result<SendOutcome, DispatchError> {
        let definition = self
            .registry
            .get(query)
            .ok_or_else(|| DispatchError::UnknownQuery(query.to_string()))?;

        let resolved = self
            .resolver
            .resolve(definition.config(), &params)
            .await
            .map_err(|source| DispatchError::Resolution {
                query: query.to_string(),
                source,
            })?;

        if let Some((validator_index, error)) =
            Self::first_failure(definition.validators(), &resolved, &params).await
        {
            debug!(query, validator_index, "Query rejected by validator");
            (callbacks.on_failure)(error.clone());
            return Ok(SendOutcome::Rejected {
                validator_index,
                error,
            });
        }

        let notification = Notification::new(query, params, callbacks.on_success);
        let listeners = self.sink.emit(query, &notification);
        info!(query, listeners, "Query dispatched");

        Ok(SendOutcome::Emitted { listeners })
    }

    /// Resolve a query's configuration without validating or emitting
    pub async fn preview(
        &self,
        query: &str,
        params: &InvocationParams,
    ) -> Result<Value, DispatchError> {
        let definition = self
            .registry
            .get(query)
            .ok_or_else(|| DispatchError::UnknownQuery(query.to_string()))?;

        self.resolver
            .resolve(definition.config(), params)
            .await
            .map_err(|source| DispatchError::Resolution {
                query: query.to_string(),
                source,
            })
    }

    /// Run every validator concurrently and pick the first invalid verdict
    /// in declared order
    async fn first_failure(
        validators: &[Arc<dyn Validator>],
        resolved: &Value,
        params: &InvocationParams,
    ) -> Option<(usize, Value)> {
        let verdicts = join_all(
            validators
                .iter()
                .map(|validator| validator.validate(resolved, params)),
        )
        .await;

        verdicts
            .into_iter()
            .enumerate()
            .find_map(|(index, verdict)| match verdict {
                Verdict::Valid => None,
                Verdict::Invalid(error) => Some((index, error)),
            })
    }
}
