//! Result of a single snapshot check.

use crate::error::{SnapshotError, SnapshotResult};
use keepsake_storage::{SnapshotName, StorageError};

/// What a snapshot check concluded.
///
/// Only [`Outcome::Matched`] is a pass. Creation and update are reported
/// separately from a mismatch so a caller can tell "the baseline moved" from
/// "the code changed".
#[derive(Debug)]
#[must_use = "a snapshot outcome must be checked or reported"]
pub enum Outcome {
    /// The candidate equals the baseline, or an update happened silently.
    Matched,
    /// No baseline existed; `contents` was recorded.
    Created { name: SnapshotName, contents: String },
    /// The baseline was overwritten in update mode.
    Updated { name: SnapshotName, diff: String },
    /// The baseline differs and was left alone.
    Mismatched { name: SnapshotName, diff: String },
    /// Storage failed, or the baseline was missing and creation is disabled.
    StorageError(StorageError),
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Matched)
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Matched => "matched",
            Outcome::Created { .. } => "created",
            Outcome::Updated { .. } => "updated",
            Outcome::Mismatched { .. } => "mismatched",
            Outcome::StorageError(_) => "storage_error",
        }
    }

    /// The diff carried by an update or mismatch.
    pub fn diff(&self) -> Option<&str> {
        match self {
            Outcome::Updated { diff, .. } | Outcome::Mismatched { diff, .. } => Some(diff),
            _ => None,
        }
    }

    /// Convert into a `Result` so `?` can be used in tests.
    pub fn into_result(self) -> SnapshotResult<()> {
        match self {
            Outcome::Matched => Ok(()),
            Outcome::Created { name, contents } => Err(SnapshotError::Created { name, contents }),
            Outcome::Updated { name, diff } => Err(SnapshotError::Updated { name, diff }),
            Outcome::Mismatched { name, diff } => Err(SnapshotError::Mismatch { name, diff }),
            Outcome::StorageError(e) => Err(SnapshotError::Storage(e)),
        }
    }
}

impl From<StorageError> for Outcome {
    fn from(err: StorageError) -> Self {
        Outcome::StorageError(err)
    }
}
