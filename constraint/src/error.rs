//! Evaluation error types.

use thiserror::Error;

/// Result type for predicate evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while evaluating a single predicate.
///
/// None of these abort a run: the checker turns each one into a failing
/// result for the constraint that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A referenced field is not in the domain specification.
    #[error("field absent: {path}")]
    FieldAbsent { path: String },

    /// Operand types do not fit the operator or function.
    #[error("type error: {message}")]
    TypeError { message: String },

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Integer arithmetic left the 64-bit range.
    #[error("arithmetic overflow")]
    Overflow,

    /// Call to a function outside the built-in table.
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    /// Wrong number of arguments for a built-in.
    #[error("{name}() expects {expected}, got {found}")]
    Arity {
        name: String,
        expected: &'static str,
        found: usize,
    },

    /// `matches` was given a pattern that does not compile.
    #[error("invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl EvalError {
    pub fn field_absent(path: impl Into<String>) -> Self {
        Self::FieldAbsent { path: path.into() }
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::TypeError {
            message: message.into(),
        }
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction { name: name.into() }
    }

    pub fn arity(name: impl Into<String>, expected: &'static str, found: usize) -> Self {
        Self::Arity {
            name: name.into(),
            expected,
            found,
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn is_field_absent(&self) -> bool {
        matches!(self, EvalError::FieldAbsent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forge_core::messages::REASON_FIELD_ABSENT;

    #[test]
    fn test_field_absent_message_names_path() {
        let err = EvalError::field_absent("constraints.hardware");
        assert_eq!(
            err.to_string(),
            format!("{}: constraints.hardware", REASON_FIELD_ABSENT)
        );
        assert!(err.is_field_absent());
    }

    #[test]
    fn test_arity_message() {
        let err = EvalError::arity("lower", "1 argument", 3);
        assert_eq!(err.to_string(), "lower() expects 1 argument, got 3");
    }
}
