//! Common messages used across Meta-Forge components.
//!
//! These constants keep failure reasons identical between the evaluator,
//! the generator and the command line.

/// Reason: a referenced field does not exist in the domain specification.
pub const REASON_FIELD_ABSENT: &str = "field absent";

/// Reason: the predicate evaluated to `false`.
pub const REASON_NOT_SATISFIED: &str = "predicate not satisfied";

/// Reason: the predicate evaluated to something other than a boolean.
pub const REASON_NOT_BOOLEAN: &str = "predicate did not evaluate to a boolean";

/// Default key of the marker added to validated artifacts.
pub const VALIDATED_MARKER: &str = "validated";
