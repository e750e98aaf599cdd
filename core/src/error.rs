//! Common error types for Meta-Forge.

use thiserror::Error;

/// Errors that can occur when building a field path.
#[derive(Debug, Error)]
pub enum PathError {
    /// The path has no segments at all.
    #[error("field path is empty")]
    Empty,

    /// One of the dotted segments is empty.
    #[error("field path '{path}' has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },
}

impl PathError {
    pub fn empty_segment(path: impl Into<String>, position: usize) -> Self {
        Self::EmptySegment {
            path: path.into(),
            position,
        }
    }
}
