//! File-based snapshot storage.
//!
//! Each snapshot name maps to one file below the snapshot directory:
//! `parser/expressions` with extension `.snap` -> `<root>/parser/expressions.snap`.
//! Contents are stored exactly as given, with no header or framing.

use crate::{SnapshotName, SnapshotStore, StorageError, StorageResult};
use keepsake_util::path::{append_suffix, safe_join, temp_sibling};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Snapshot storage on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    extension: String,
}

impl FileStore {
    /// Create a store rooted at `root` with no file extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: String::new(),
        }
    }

    /// Set the suffix appended to every snapshot file name.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// The snapshot directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The snapshot file suffix.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Get the file path for a snapshot name.
    pub fn path_for(&self, name: &SnapshotName) -> StorageResult<PathBuf> {
        let relative = name.to_relative_path();
        let path = safe_join(&self.root, &relative).ok_or_else(|| {
            StorageError::invalid_name(format!("{name} escapes {}", self.root.display()))
        })?;
        Ok(append_suffix(&path, &self.extension))
    }

    /// Map a file below the root back to its snapshot name.
    fn name_for(&self, path: &Path) -> Option<SnapshotName> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let mut segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_str().map(str::to_string))
            .collect::<Option<_>>()?;

        let file_name = segments.pop()?;
        let stem = file_name.strip_suffix(self.extension.as_str())?;
        segments.push(stem.to_string());

        SnapshotName::new(segments.join("/")).ok()
    }
}

/// Whether `path` has the `.{file}.{pid}.tmp` shape of a staged write.
fn is_staging_file(path: &Path) -> bool {
    let Some(inner) = path
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_prefix('.'))
        .and_then(|n| n.strip_suffix(".tmp"))
    else {
        return false;
    };

    match inner.rsplit_once('.') {
        Some((file, pid)) => {
            !file.is_empty() && !pid.is_empty() && pid.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

fn discard_staging_file(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to remove staging file");
        }
    }
}

impl SnapshotStore for FileStore {
    fn read(&self, name: &SnapshotName) -> StorageResult<Option<String>> {
        let path = self.path_for(name)?;
        debug!(path = %path.display(), "Reading snapshot");

        match fs::read(&path) {
            Ok(bytes) => Ok(Some(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    fn write(&self, name: &SnapshotName, contents: &str) -> StorageResult<()> {
        let path = self.path_for(name)?;
        debug!(path = %path.display(), bytes = contents.len(), "Writing snapshot");

        // Create parent directories
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }

        // Write atomically (write to temp file, then rename)
        let temp_path = temp_sibling(&path);
        if let Err(e) = fs::write(&temp_path, contents) {
            discard_staging_file(&temp_path);
            return Err(StorageError::io(&temp_path, e));
        }
        if let Err(e) = fs::rename(&temp_path, &path) {
            discard_staging_file(&temp_path);
            return Err(StorageError::io(&path, e));
        }

        Ok(())
    }

    fn exists(&self, name: &SnapshotName) -> StorageResult<bool> {
        let path = self.path_for(name)?;
        Ok(path.is_file())
    }

    fn remove(&self, name: &SnapshotName) -> StorageResult<()> {
        let path = self.path_for(name)?;
        debug!(path = %path.display(), "Removing snapshot");

        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    fn list(&self) -> StorageResult<Vec<SnapshotName>> {
        debug!(path = %self.root.display(), "Listing snapshots");

        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                StorageError::io(&path, e.into())
            })?;

            if !entry.file_type().is_file() || is_staging_file(entry.path()) {
                continue;
            }

            match self.name_for(entry.path()) {
                Some(name) => names.push(name),
                None => debug!(path = %entry.path().display(), "Skipping non-snapshot file"),
            }
        }

        names.sort();
        Ok(names)
    }

    fn location(&self, name: &SnapshotName) -> String {
        match self.path_for(name) {
            Ok(path) => path.display().to_string(),
            Err(_) => name.to_string(),
        }
    }
}
