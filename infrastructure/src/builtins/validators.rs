//! Built-in validators available to query files.
//!
//! Fields are addressed with JSON pointers into the resolved tree
//! (`/user/name`, `/tags/0`, or `""` for the whole tree). Every validator
//! reports its `message` as a string error payload.

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use switchboard_domain::{InvocationParams, Validator, Verdict};

/// True for `null`, `""`, `[]` and `{}`
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Field must exist and not be blank
#[derive(Debug, Clone)]
pub struct NonEmptyValidator {
    pointer: String,
    message: String,
}

impl NonEmptyValidator {
    pub fn new(pointer: impl Into<String>, message: Option<String>) -> Self {
        let pointer = pointer.into();
        let message = message.unwrap_or_else(|| format!("{} must not be empty", pointer));
        Self { pointer, message }
    }
}

#[async_trait]
impl Validator for NonEmptyValidator {
    async fn validate(&self, resolved: &Value, _params: &InvocationParams) -> Verdict {
        let valid = resolved.pointer(&self.pointer).is_some_and(|v| !is_blank(v));
        Verdict::from_parts(valid, Some(Value::String(self.message.clone())))
    }
}

/// Every listed field must exist and not be `null`
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    pointers: Vec<String>,
    message: Option<String>,
}

impl RequiredValidator {
    pub fn new(pointers: Vec<String>, message: Option<String>) -> Self {
        Self { pointers, message }
    }
}

#[async_trait]
impl Validator for RequiredValidator {
    async fn validate(&self, resolved: &Value, _params: &InvocationParams) -> Verdict {
        let missing = self
            .pointers
            .iter()
            .find(|pointer| resolved.pointer(pointer).is_none_or(Value::is_null));

        match missing {
            None => Verdict::Valid,
            Some(pointer) => Verdict::invalid(
                self.message
                    .clone()
                    .unwrap_or_else(|| format!("missing required field {}", pointer)),
            ),
        }
    }
}

/// Field must be a string matching a regular expression
#[derive(Debug, Clone)]
pub struct PatternValidator {
    pointer: String,
    pattern: Regex,
    message: String,
}

impl PatternValidator {
    pub fn new(pointer: impl Into<String>, pattern: Regex, message: Option<String>) -> Self {
        let pointer = pointer.into();
        let message = message
            .unwrap_or_else(|| format!("{} does not match {}", pointer, pattern.as_str()));
        Self {
            pointer,
            pattern,
            message,
        }
    }
}

#[async_trait]
impl Validator for PatternValidator {
    async fn validate(&self, resolved: &Value, _params: &InvocationParams) -> Verdict {
        let valid = resolved
            .pointer(&self.pointer)
            .and_then(Value::as_str)
            .is_some_and(|s| self.pattern.is_match(s));
        Verdict::from_parts(valid, Some(Value::String(self.message.clone())))
    }
}

/// The invocation must carry at least `min` parameters
#[derive(Debug, Clone)]
pub struct ParamCountValidator {
    min: usize,
    message: Option<String>,
}

impl ParamCountValidator {
    pub fn new(min: usize, message: Option<String>) -> Self {
        Self { min, message }
    }
}

#[async_trait]
impl Validator for ParamCountValidator {
    async fn validate(&self, _resolved: &Value, params: &InvocationParams) -> Verdict {
        if params.len() >= self.min {
            return Verdict::Valid;
        }
        Verdict::invalid(self.message.clone().unwrap_or_else(|| {
            format!(
                "expected at least {} parameters, got {}",
                self.min,
                params.len()
            )
        }))
    }
}
