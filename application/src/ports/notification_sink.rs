//! Notification sink port
//!
//! Defines the publish/subscribe interface the dispatcher emits to once a
//! query passes validation. Listeners are registered per query name and are
//! invoked synchronously, once each, in registration order.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use switchboard_domain::InvocationParams;

/// Continuation receiving a single payload
pub type Callback = Arc<dyn Fn(Value) + Send + Sync>;

/// Business logic subscribed to a query name
pub type Listener = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Success and failure continuations supplied with one `send`
#[derive(Clone)]
pub struct Callbacks {
    pub on_success: Callback,
    pub on_failure: Callback,
}

impl Callbacks {
    pub fn new<S, F>(on_success: S, on_failure: F) -> Self
    where
        S: Fn(Value) + Send + Sync + 'static,
        F: Fn(Value) + Send + Sync + 'static,
    {
        Self {
            on_success: Arc::new(on_success),
            on_failure: Arc::new(on_failure),
        }
    }

    /// Callbacks that ignore every payload
    pub fn noop() -> Self {
        Self::new(|_| {}, |_| {})
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callbacks { .. }")
    }
}

/// Payload emitted for a query that passed validation.
///
/// Payload order: the invocation parameters first, then the success
/// continuation. The dispatcher never calls the continuation itself; a
/// listener does so through [`Notification::succeed`].
#[derive(Clone)]
pub struct Notification {
    query: String,
    params: InvocationParams,
    on_success: Callback,
}

impl Notification {
    pub fn new(query: impl Into<String>, params: InvocationParams, on_success: Callback) -> Self {
        Self {
            query: query.into(),
            params,
            on_success,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn params(&self) -> &InvocationParams {
        &self.params
    }

    /// Invoke the caller's success continuation
    pub fn succeed(&self, value: Value) {
        (self.on_success)(value);
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("query", &self.query)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Port for fanning out notifications to listeners
///
/// Implementations (adapters) live in the infrastructure layer.
pub trait NotificationSink: Send + Sync {
    /// Register a listener for `event`
    fn on(&self, event: &str, listener: Listener);

    /// Invoke every listener registered for `event`, in registration order.
    ///
    /// Returns the number of listeners invoked; zero is not an error.
    fn emit(&self, event: &str, notification: &Notification) -> usize;

    /// Number of listeners currently registered for `event`
    fn listener_count(&self, event: &str) -> usize;
}
