//! Dotted field paths into nested mappings.

use crate::{Map, PathError, Value};
use std::fmt;

/// A non-empty sequence of keys, written `context.domain`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Create a path from already-validated segments.
    pub fn new(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(pos) = segments.iter().position(|s| s.is_empty()) {
            return Err(PathError::empty_segment(segments.join("."), pos));
        }
        Ok(Self { segments })
    }

    /// Parse a dotted path such as `constraints.hardware`.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }
        Self::new(trimmed.split('.').map(|s| s.trim().to_string()).collect())
    }

    /// Path of a single top-level key.
    pub fn key(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Resolve the path against a root mapping.
    ///
    /// Returns `None` when any segment is missing or an intermediate value is
    /// not a mapping. An explicit `null` at the end of the path resolves to
    /// `Some(&Value::Null)`.
    pub fn resolve<'a>(&self, root: &'a Map) -> Option<&'a Value> {
        let (first, rest) = self.segments.split_first()?;
        let mut current = root.get(first)?;
        for segment in rest {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
