//! Runtime error types raised through method invocation

use thiserror::Error;

/// Result type for host function and method calls
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Argument count mismatch detected by an arity-checking invoker.
///
/// Carries the observed count and the declared bounds so the call site can
/// render the usual `wrong number of arguments` message or inspect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("wrong number of arguments (given {observed}, expected {})", expected_arity(.min, .max))]
pub struct ArityError {
    /// Number of arguments passed by the caller
    pub observed: usize,
    /// Declared minimum
    pub min: usize,
    /// Declared maximum (`None` = unbounded)
    pub max: Option<usize>,
}

fn expected_arity(min: &usize, max: &Option<usize>) -> String {
    match *max {
        None => format!("{}+", min),
        Some(max) if max == *min => max.to_string(),
        Some(max) => format!("{}..{}", min, max),
    }
}

/// Errors raised while calling into a bound method.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Argument count outside the declared bounds
    #[error("ArgumentError: {0}")]
    Arity(#[from] ArityError),

    /// Value had the wrong type for a host parameter
    #[error("TypeError: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Method lookup failed
    #[error("NoMethodError: undefined method '{name}' for {receiver}")]
    NoMethod {
        /// Method name
        name: String,
        /// Receiver description
        receiver: String,
    },

    /// A host function raised an error of its own
    #[error("{0}")]
    Raised(String),
}

impl RuntimeError {
    /// Check if this is an argument count error
    pub fn is_arity_error(&self) -> bool {
        matches!(self, RuntimeError::Arity(_))
    }
}

impl From<String> for RuntimeError {
    fn from(s: String) -> Self {
        RuntimeError::Raised(s)
    }
}

impl From<&str> for RuntimeError {
    fn from(s: &str) -> Self {
        RuntimeError::Raised(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_error_messages() {
        let exact = ArityError { observed: 0, min: 1, max: Some(1) };
        assert_eq!(exact.to_string(), "wrong number of arguments (given 0, expected 1)");

        let range = ArityError { observed: 3, min: 1, max: Some(2) };
        assert_eq!(range.to_string(), "wrong number of arguments (given 3, expected 1..2)");

        let open = ArityError { observed: 0, min: 2, max: None };
        assert_eq!(open.to_string(), "wrong number of arguments (given 0, expected 2+)");
    }

    #[test]
    fn test_runtime_error_from_arity() {
        let err: RuntimeError = ArityError { observed: 5, min: 4, max: Some(4) }.into();
        assert!(err.is_arity_error());
        assert!(err.to_string().starts_with("ArgumentError:"));
    }
}
