//! Generation error types.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Result type for generation.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Errors that can occur when generating an artifact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerateError {
    /// One or more constraints failed; nothing was generated.
    #[error("constraint violation: {0}")]
    ConstraintViolation(ViolationReport),
}

impl GenerateError {
    /// The violation report, if this is a constraint violation.
    pub fn report(&self) -> Option<&ViolationReport> {
        match self {
            GenerateError::ConstraintViolation(report) => Some(report),
        }
    }
}

/// A failing constraint in a violation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub id: String,
    pub reason: String,
}

/// Every failing constraint of one generation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationReport {
    /// Name of the domain specification that was rejected.
    pub specification: String,
    /// Failing constraints in document order.
    pub failures: Vec<Failure>,
}

impl ViolationReport {
    /// Ids of the failing constraints.
    pub fn ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.id.as_str()).collect()
    }
}

impl fmt::Display for ViolationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} constraint(s) failed for '{}'",
            self.failures.len(),
            self.specification
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.id, failure.reason)?;
        }
        Ok(())
    }
}
