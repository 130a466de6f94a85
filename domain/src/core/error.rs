//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building a query registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Query name cannot be empty")]
    EmptyQueryName,

    #[error("Query \"{0}\" is registered more than once")]
    DuplicateQuery(String),
}

impl DomainError {
    /// Check if this error is caused by a name collision
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DomainError::DuplicateQuery(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_error_display() {
        let error = DomainError::DuplicateQuery("createUser".to_string());
        assert_eq!(
            error.to_string(),
            "Query \"createUser\" is registered more than once"
        );
    }

    #[test]
    fn test_is_duplicate_check() {
        assert!(DomainError::DuplicateQuery("q".to_string()).is_duplicate());
        assert!(!DomainError::EmptyQueryName.is_duplicate());
    }
}
