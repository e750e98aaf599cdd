//! Error types for document loading.

use thiserror::Error;

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur when loading a rules document or a domain specification.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read.
    #[error("failed to read '{document}': {source}")]
    Io {
        document: String,
        source: std::io::Error,
    },

    /// The text is not well-formed JSON or YAML.
    #[error("malformed document '{document}': {message}")]
    Parse { document: String, message: String },

    /// The text parsed, but required structure is missing or invalid.
    #[error("invalid document '{document}': {message}")]
    Schema { document: String, message: String },
}

impl LoadError {
    pub fn io(document: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            document: document.into(),
            source,
        }
    }

    pub fn parse(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            document: document.into(),
            message: message.into(),
        }
    }

    pub fn schema(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            document: document.into(),
            message: message.into(),
        }
    }

    /// Name of the document the error refers to.
    pub fn document(&self) -> &str {
        match self {
            LoadError::Io { document, .. }
            | LoadError::Parse { document, .. }
            | LoadError::Schema { document, .. } => document,
        }
    }

    pub fn is_schema_error(&self) -> bool {
        matches!(self, LoadError::Schema { .. })
    }
}
