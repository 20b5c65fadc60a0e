//! Error types for the lisp101 interpreter

use thiserror::Error;

/// Interpreter errors
///
/// Every variant describes a fault in the user's program. None of them are
/// caught inside the scanner, parser, evaluator or builtin library; they
/// propagate to whoever called [`crate::parse`] or [`crate::eval_program`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // Parse errors
    /// Syntax error encountered during parsing
    ///
    /// **Triggered by:** unmatched or mismatched brackets, unterminated string literals
    /// **Example:** `(1 2` (missing close), `(1 2]` (round opened, square closed)
    #[error("Syntax error at line {line}, column {col}: {message}")]
    SyntaxError {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },

    // Runtime errors
    /// Reference to a symbol that is not bound anywhere in the environment chain
    ///
    /// **Triggered by:** using a name before defining it
    /// **Example:** `zzz` (when zzz was never defined)
    #[error("Unbound variable: {name}")]
    UnboundVariable {
        /// Symbol name
        name: String,
    },

    /// Type mismatch error
    ///
    /// **Triggered by:** a value used where a different variant is required
    /// **Example:** `(+ "hello" 5)`, `(if 1 2 3)`, `(car 5)`
    #[error("Type error: expected {expected}, got {got}")]
    TypeError {
        /// Expected type
        expected: String,
        /// Actual type
        got: String,
    },

    /// Procedure called with fewer arguments than it requires
    ///
    /// **Example:** `((lambda (x y) x) 1)`
    #[error("Arity error: {name} expects at least {expected} argument(s), got {got}")]
    ArityError {
        /// Procedure name (`lambda` for anonymous closures)
        name: String,
        /// Required argument count
        expected: usize,
        /// Supplied argument count
        got: usize,
    },

    /// Attempt to call a non-callable value
    ///
    /// **Example:** `(1 2 3)`
    #[error("Value is not callable: {type_name}")]
    NotCallable {
        /// Type of non-callable value
        type_name: String,
    },

    /// Malformed special form or builtin invocation
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// Special form or builtin name
        tool: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Operation on empty list that requires elements
    #[error("Empty list for operation: {operation}")]
    EmptyCollection {
        /// Operation name
        operation: String,
    },

    /// Integer arithmetic left the i64 range
    #[error("Integer overflow in {op}")]
    IntegerOverflow {
        /// Operator that overflowed
        op: String,
    },
}

impl Error {
    /// Create a type error from an expected description and the offending type name
    pub fn type_error(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::TypeError {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Create an invalid-arguments error for a special form or builtin
    pub fn invalid_args(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised while reading source text
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::SyntaxError { .. })
    }
}

/// Result type for lisp101 operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = Error::UnboundVariable {
            name: "zzz".to_string(),
        };
        assert_eq!(err.to_string(), "Unbound variable: zzz");

        let err = Error::type_error("int", "string");
        assert_eq!(err.to_string(), "Type error: expected int, got string");

        let err = Error::ArityError {
            name: "lambda".to_string(),
            expected: 2,
            got: 1,
        };
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_is_syntax() {
        let err = Error::SyntaxError {
            line: 1,
            col: 4,
            message: "Unexpected `)`".to_string(),
        };
        assert!(err.is_syntax());
        assert!(!Error::invalid_args("if", "missing branch").is_syntax());
    }
}
