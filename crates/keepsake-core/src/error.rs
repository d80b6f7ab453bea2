//! Core error types.

use keepsake_dump::DumpError;
use keepsake_storage::{SnapshotName, StorageError};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration and setup operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised outside of a snapshot check.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Settings file exists but could not be read.
    #[error("Failed to read settings {}: {}", .path.display(), .source)]
    SettingsIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid.
    #[error("Invalid settings {}: {}", .path.display(), .source)]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Dump(#[from] DumpError),
}

/// Result type for snapshot checks.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// A snapshot check that did not simply match.
///
/// The messages have a fixed shape because people and tools read them
/// straight out of test output.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// No baseline existed; the candidate was recorded as the new baseline.
    #[error("snapshot created for test {name}, with contents:\n{contents}")]
    Created { name: SnapshotName, contents: String },

    /// The baseline differed and was overwritten in update mode.
    #[error("snapshot {name} updated:\n{diff}")]
    Updated { name: SnapshotName, diff: String },

    /// The baseline differed and update mode was off.
    #[error("snapshot not equal:\n{diff}")]
    Mismatch { name: SnapshotName, diff: String },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Dump(#[from] DumpError),
}

impl SnapshotError {
    /// The diff carried by an update or mismatch.
    pub fn diff(&self) -> Option<&str> {
        match self {
            Self::Updated { diff, .. } | Self::Mismatch { diff, .. } => Some(diff),
            _ => None,
        }
    }
}
