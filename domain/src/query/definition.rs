//! Query definition entity

use super::config_node::ConfigNode;
use super::validator::Validator;
use std::fmt;
use std::sync::Arc;

/// A registered query: its validators (in declared order) and its
/// configuration tree. Never mutated after registration.
#[derive(Clone)]
pub struct QueryDefinition {
    validators: Vec<Arc<dyn Validator>>,
    config: ConfigNode,
}

impl QueryDefinition {
    /// A query guarded by a single validator
    pub fn new<V: Validator + 'static>(validator: V, config: ConfigNode) -> Self {
        Self {
            validators: vec![Arc::new(validator)],
            config,
        }
    }

    /// A query guarded by an ordered list of validators
    pub fn with_validators(validators: Vec<Arc<dyn Validator>>, config: ConfigNode) -> Self {
        Self { validators, config }
    }

    /// Append another validator after the existing ones
    pub fn and_validator<V: Validator + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn config(&self) -> &ConfigNode {
        &self.config
    }
}

impl fmt::Debug for QueryDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDefinition")
            .field("validators", &self.validators.len())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::validator::{FnValidator, Verdict};
    use serde_json::json;

    #[test]
    fn test_single_validator_is_one_element_list() {
        let definition = QueryDefinition::new(
            FnValidator::new(|_, _| Verdict::Valid),
            ConfigNode::from(json!({"a": 1})),
        );
        assert_eq!(definition.validators().len(), 1);
    }

    #[test]
    fn test_and_validator_preserves_order() {
        let definition = QueryDefinition::new(
            FnValidator::new(|_, _| Verdict::invalid("first")),
            ConfigNode::literal(json!(null)),
        )
        .and_validator(FnValidator::new(|_, _| Verdict::invalid("second")));

        assert_eq!(definition.validators().len(), 2);
        assert!(format!("{:?}", definition).contains("validators: 2"));
    }
}
