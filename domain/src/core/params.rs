//! Invocation parameters value object

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::sync::Arc;

/// Positional parameters of a single `send` invocation (Value Object)
///
/// Immutable once created. Cloning is cheap, so the same parameter set can be
/// handed to every resolver and validator of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationParams {
    values: Arc<[Value]>,
}

impl InvocationParams {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values: values.into(),
        }
    }

    /// An invocation without parameters
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parameter at `index`, if supplied
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.values
    }

    /// All parameters as a JSON array
    pub fn to_value(&self) -> Value {
        Value::Array(self.values.to_vec())
    }
}

impl From<Vec<Value>> for InvocationParams {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

impl FromIterator<Value> for InvocationParams {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Serialize for InvocationParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}
