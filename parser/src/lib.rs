//! Meta-Forge Parser
//!
//! This crate provides parsing for constraint predicates:
//! - Expression parsing (boolean logic, comparison, arithmetic, function calls)
//! - Field paths into the domain specification (`constraints.hardware`)
//! - Error handling with location information

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{parse_predicate, Parser, MAX_NESTING_DEPTH};
