//! Meta-Forge Document
//!
//! Loads the two inputs of a forge run from JSON or YAML:
//! - `RuleDocument`: ordered, named constraints with parsed predicates
//! - `DomainSpecification`: the field tree the constraints are checked against
//!
//! Malformed text is a `LoadError::Parse`; text that parses but has the
//! wrong structure is a `LoadError::Schema`.

mod error;
mod format;
mod rules;
mod spec;

pub use error::*;
pub use format::DocumentFormat;
pub use rules::{Constraint, RuleDocument};
pub use spec::DomainSpecification;
