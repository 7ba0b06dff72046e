//! Error types for querykit

use thiserror::Error;

/// Result type alias for querykit operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Recoverable, caller-facing errors.
///
/// Compilation itself never fails; these come from malformed usage of a
/// builder or from resolving a dialect by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A bulk row did not have one value per column
    #[error("Length mismatch: expected {expected} values, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// Dialect lookup by name failed
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

impl QueryError {
    /// Create an arity mismatch error
    pub fn arity(expected: usize, actual: usize) -> Self {
        Self::ArityMismatch { expected, actual }
    }

    /// Check if this is an arity mismatch error
    pub fn is_arity_mismatch(&self) -> bool {
        matches!(self, Self::ArityMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QueryError::arity(3, 2).to_string(),
            "Length mismatch: expected 3 values, got 2"
        );
        assert_eq!(
            QueryError::UnknownDialect("oracle".into()).to_string(),
            "Unknown dialect: oracle"
        );
        assert!(QueryError::arity(1, 0).is_arity_mismatch());
    }
}
