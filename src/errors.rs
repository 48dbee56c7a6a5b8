//! Typed error definitions for ordir.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrdirError {
    #[error("Entry not found: {name}, in {}", dir.display())]
    NotFound { name: String, dir: PathBuf },

    #[error("Storage {op} failed on {}: {source}", path.display())]
    Storage {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl OrdirError {
    /// Stable numeric code, used as a structured log field.
    pub fn code(&self) -> i32 {
        match self {
            OrdirError::NotFound { .. } => 2,
            OrdirError::Storage { .. } => 3,
            OrdirError::Config(_) => 4,
        }
    }

    /// Wrap an io::Error raised by a storage call on `path`.
    pub fn storage(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        OrdirError::Storage {
            op,
            path: path.into(),
            source,
        }
    }

    /// Underlying io::ErrorKind for storage failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            OrdirError::Storage { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

pub type Result<T, E = OrdirError> = std::result::Result<T, E>;
