//! Storage layer for keepsake.
//!
//! Each snapshot is one plain text file. This crate provides the storage
//! abstraction with two backends:
//! - File storage below a snapshot directory (default)
//! - In-memory storage (for testing)

pub mod error;
pub mod file;
pub mod memory;
pub mod name;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use name::SnapshotName;

use std::sync::Arc;

/// A backend holding one text blob per snapshot name.
///
/// Names may contain `/` to place snapshots in nested directories.
pub trait SnapshotStore: Send + Sync {
    /// Read the stored snapshot.
    ///
    /// Returns `None` if no snapshot has been recorded under `name`.
    fn read(&self, name: &SnapshotName) -> StorageResult<Option<String>>;

    /// Replace the stored snapshot with `contents`.
    ///
    /// Creates parent directories if necessary. Readers never observe a
    /// partially written snapshot.
    fn write(&self, name: &SnapshotName, contents: &str) -> StorageResult<()>;

    /// Check if a snapshot exists.
    fn exists(&self, name: &SnapshotName) -> StorageResult<bool> {
        Ok(self.read(name)?.is_some())
    }

    /// Remove a snapshot. Removing a missing snapshot is not an error.
    fn remove(&self, name: &SnapshotName) -> StorageResult<()>;

    /// List every recorded snapshot, sorted by name.
    fn list(&self) -> StorageResult<Vec<SnapshotName>>;

    /// Human-readable location of a snapshot, for messages.
    fn location(&self, name: &SnapshotName) -> String;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn read(&self, name: &SnapshotName) -> StorageResult<Option<String>> {
        (**self).read(name)
    }

    fn write(&self, name: &SnapshotName, contents: &str) -> StorageResult<()> {
        (**self).write(name, contents)
    }

    fn exists(&self, name: &SnapshotName) -> StorageResult<bool> {
        (**self).exists(name)
    }

    fn remove(&self, name: &SnapshotName) -> StorageResult<()> {
        (**self).remove(name)
    }

    fn list(&self) -> StorageResult<Vec<SnapshotName>> {
        (**self).list()
    }

    fn location(&self, name: &SnapshotName) -> String {
        (**self).location(name)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn read(&self, name: &SnapshotName) -> StorageResult<Option<String>> {
        (**self).read(name)
    }

    fn write(&self, name: &SnapshotName, contents: &str) -> StorageResult<()> {
        (**self).write(name, contents)
    }

    fn exists(&self, name: &SnapshotName) -> StorageResult<bool> {
        (**self).exists(name)
    }

    fn remove(&self, name: &SnapshotName) -> StorageResult<()> {
        (**self).remove(name)
    }

    fn list(&self) -> StorageResult<Vec<SnapshotName>> {
        (**self).list()
    }

    fn location(&self, name: &SnapshotName) -> String {
        (**self).location(name)
    }
}
