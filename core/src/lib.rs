//! Meta-Forge Core Types
//!
//! This crate provides the foundational types used throughout Meta-Forge:
//! - Value types (the Value enum and ordered Map used for documents)
//! - Field paths (dotted references into nested mappings)
//! - Shared failure reasons
//! - Common error types

mod error;
pub mod messages;
mod path;
mod value;

pub use error::*;
pub use path::*;
pub use value::*;
