//! In-memory storage implementation for testing.

use crate::{SnapshotName, SnapshotStore, StorageError, StorageResult};
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory snapshot storage.
///
/// This stores all snapshots in memory and is not persistent.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<BTreeMap<SnapshotName, String>>,
}

impl MemoryStore {
    /// Create a new in-memory storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a snapshot, builder style.
    pub fn with_snapshot(self, name: SnapshotName, contents: impl Into<String>) -> Self {
        if let Ok(mut data) = self.data.write() {
            data.insert(name, contents.into());
        }
        self
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.data.read().map(|data| data.len()).unwrap_or(0)
    }

    /// Whether no snapshot is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, name: &SnapshotName) -> StorageResult<Option<String>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(data.get(name).cloned())
    }

    fn write(&self, name: &SnapshotName, contents: &str) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        data.insert(name.clone(), contents.to_string());
        Ok(())
    }

    fn remove(&self, name: &SnapshotName) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        data.remove(name);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<SnapshotName>> {
        let data = self
            .data
            .read()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(data.keys().cloned().collect())
    }

    fn location(&self, name: &SnapshotName) -> String {
        format!("memory:{name}")
    }
}
