//! CLI error types

use std::path::PathBuf;

use forge_constraint::EvalError;
use forge_document::LoadError;
use forge_parser::ParseError;
use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid predicate: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation failed: {0}")]
    Eval(#[from] EvalError),

    #[error("cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Write {
            path: path.into(),
            source,
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
