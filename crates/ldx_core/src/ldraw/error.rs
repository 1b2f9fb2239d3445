//! Errors raised while reading LDraw documents and library files.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing, resolving or flattening LDraw data.
#[derive(Error, Debug)]
pub enum LdrawError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file {file} wrong line {line}: {message}")]
    Format {
        file: String,
        line: usize,
        message: String,
    },

    #[error("file {file} line {line}: expected a `0 <name>` or `0 FILE <name>` header")]
    HeaderExpected { file: String, line: usize },

    #[error("sub file not found: {0}")]
    SubFileNotFound(String),

    #[error("inline model `{0}` references itself through its sub-models")]
    ModelCycle(String),

    #[error("reference database error: {0}")]
    Database(#[from] serde_json::Error),
}

impl LdrawError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(file: &str, line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Result type for LDraw operations.
pub type LdrawResult<T> = Result<T, LdrawError>;
