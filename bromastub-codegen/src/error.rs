//! Error types for code generation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Description parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] bromastub_schema::ParseError),

    /// A required input file does not exist.
    #[error("input file '{}' not found", path.display())]
    InputMissing {
        /// Missing path.
        path: PathBuf,
    },

    /// IO error on a specific path.
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// IDE configuration could not be serialised.
    #[error("IDE configuration error: {0}")]
    IdeConfig(#[from] serde_json::Error),
}

impl CodegenError {
    /// Creates an IO error for the given path.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
