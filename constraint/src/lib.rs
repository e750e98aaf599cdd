//! Meta-Forge Constraint
//!
//! Evaluates the constraints of a rule document against a domain
//! specification and reports one pass/fail result per constraint.

mod checker;
mod error;
mod eval;
mod result;

pub use checker::{check_fields, evaluate, ConstraintChecker};
pub use error::*;
pub use eval::Evaluator;
pub use result::{Evaluation, EvaluationResult};
