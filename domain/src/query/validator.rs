//! Validators deciding whether a resolved tree may be dispatched.

use crate::core::params::InvocationParams;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Outcome of one validator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "verdict", content = "error", rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    /// Invalid, carrying the error payload handed to the failure callback.
    /// A validator without a reason reports `Value::Null`.
    Invalid(Value),
}

impl Verdict {
    pub fn invalid(error: impl Into<Value>) -> Self {
        Self::Invalid(error.into())
    }

    /// Build a verdict from a validity flag and an optional error
    pub fn from_parts(valid: bool, error: Option<Value>) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid(error.unwrap_or(Value::Null))
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// The error payload, if invalid
    pub fn error(&self) -> Option<&Value> {
        match self {
            Verdict::Valid => None,
            Verdict::Invalid(error) => Some(error),
        }
    }
}

/// Predicate-with-reason over a resolved tree.
///
/// Receives the same parameters the tree was resolved with. Validators are
/// pure from the dispatcher's point of view.
#[async_trait]
pub trait Validator: Send + Sync {
    async fn validate(&self, resolved: &Value, params: &InvocationParams) -> Verdict;
}

/// Adapter turning a synchronous closure into a [`Validator`]
pub struct FnValidator<F> {
    func: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&Value, &InvocationParams) -> Verdict + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F> Validator for FnValidator<F>
where
    F: Fn(&Value, &InvocationParams) -> Verdict + Send + Sync,
{
    async fn validate(&self, resolved: &Value, params: &InvocationParams) -> Verdict {
        (self.func)(resolved, params)
    }
}
