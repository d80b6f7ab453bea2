//! Storage error types.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error (permission denied, disk full, not a directory, etc.)
    #[error("IO error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot name cannot be mapped to a location
    #[error("Invalid snapshot name: {0}")]
    InvalidName(String),

    /// No baseline exists and creating one was not allowed
    #[error("snapshot {name} does not exist")]
    NoBaseline { name: String },

    /// Lock was poisoned (another thread panicked while holding the lock)
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StorageError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid name error.
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::InvalidName(message.into())
    }

    /// Create a missing baseline error.
    pub fn no_baseline(name: impl std::fmt::Display) -> Self {
        Self::NoBaseline {
            name: name.to_string(),
        }
    }
}
