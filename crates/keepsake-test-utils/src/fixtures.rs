//! Test fixtures for isolated snapshot directories.

use keepsake_core::Config;
use keepsake_storage::SnapshotName;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary snapshot directory.
///
/// The directory is removed when the sandbox is dropped. The configuration it
/// hands out points at the directory and never enters update mode, whatever
/// the environment says.
///
/// # Example
///
/// ```rust
/// use keepsake_test_utils::fixtures::SnapshotSandbox;
///
/// let sandbox = SnapshotSandbox::new()
///     .with_extension(".snap")
///     .with_baseline("nested/case", "recorded\n");
///
/// assert!(sandbox.path("nested/case").is_file());
/// assert_eq!(sandbox.read("nested/case").as_deref(), Some("recorded\n"));
/// ```
pub struct SnapshotSandbox {
    temp_dir: TempDir,
    extension: String,
}

impl SnapshotSandbox {
    /// Create an empty sandbox.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
            extension: String::new(),
        }
    }

    /// Use `extension` for snapshot files.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Seed a baseline file.
    pub fn with_baseline(self, name: &str, contents: &str) -> Self {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", parent.display(), e));
        }
        fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", path.display(), e));
        self
    }

    /// The snapshot directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Configuration rooted at the sandbox with update mode off.
    pub fn config(&self) -> Config {
        Config::default()
            .with_snapshot_dir(self.root())
            .with_file_extension(self.extension.clone())
            .with_should_update(|| false)
    }

    /// Same as [`config`](Self::config) but in update mode.
    pub fn updating_config(&self) -> Config {
        self.config().with_should_update(|| true)
    }

    /// Parse a snapshot name, panicking on invalid input.
    pub fn name(&self, name: &str) -> SnapshotName {
        SnapshotName::new(name).unwrap_or_else(|e| panic!("Invalid snapshot name {name}: {e}"))
    }

    /// File path of a snapshot inside the sandbox.
    pub fn path(&self, name: &str) -> PathBuf {
        let mut path = self.root().to_path_buf();
        for segment in name.split('/') {
            path.push(segment);
        }
        let mut file = path.into_os_string();
        file.push(&self.extension);
        PathBuf::from(file)
    }

    /// Read a snapshot file, `None` if it does not exist.
    pub fn read(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path(name)).ok()
    }

    /// Number of files below the sandbox root.
    pub fn file_count(&self) -> usize {
        fn count(dir: &Path) -> usize {
            fs::read_dir(dir)
                .map(|entries| {
                    entries
                        .filter_map(Result::ok)
                        .map(|e| {
                            let path = e.path();
                            if path.is_dir() {
                                count(&path)
                            } else {
                                1
                            }
                        })
                        .sum()
                })
                .unwrap_or(0)
        }
        count(self.root())
    }
}

impl Default for SnapshotSandbox {
    fn default() -> Self {
        Self::new()
    }
}
