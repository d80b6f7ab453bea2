//! Snapshot names.

use crate::{StorageError, StorageResult};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Identifier of one snapshot, unique within a snapshot directory.
///
/// `/` separates nested directories, so `parser/expressions` is stored as
/// `parser/expressions<ext>` below the snapshot directory. Segments may not
/// be empty, `.` or `..`, and may not contain backslashes or NUL bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotName(String);

impl SnapshotName {
    /// Validate and wrap a name.
    pub fn new(name: impl Into<String>) -> StorageResult<Self> {
        let name = name.into();
        validate(&name)?;
        Ok(Self(name))
    }

    /// Derive the name of an additional snapshot taken by the same test.
    pub fn with_suffix(&self, id: &str) -> StorageResult<Self> {
        Self::new(format!("{}-{}", self.0, id))
    }

    /// Get the name as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `/`-separated segments of the name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }

    /// Relative path of the snapshot, without any file extension.
    pub fn to_relative_path(&self) -> PathBuf {
        self.segments().collect()
    }
}

fn validate(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::invalid_name("name cannot be empty"));
    }

    for segment in name.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
            || segment.contains('\0')
        {
            return Err(StorageError::invalid_name(format!(
                "invalid segment {segment:?} in {name:?}"
            )));
        }
    }

    Ok(())
}

impl fmt::Display for SnapshotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SnapshotName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SnapshotName {
    type Err = StorageError;

    fn from_str(s: &str) -> StorageResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SnapshotName {
    type Error = StorageError;

    fn try_from(value: &str) -> StorageResult<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for SnapshotName {
    type Error = StorageError;

    fn try_from(value: String) -> StorageResult<Self> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_nested_names() {
        assert_eq!(
            SnapshotName::new("examples-TestString").unwrap().as_str(),
            "examples-TestString"
        );
        let nested = SnapshotName::new("advanced/TestSubfolder").unwrap();
        assert_eq!(
            nested.segments().collect::<Vec<_>>(),
            vec!["advanced", "TestSubfolder"]
        );
        assert_eq!(
            nested.to_relative_path(),
            PathBuf::from("advanced").join("TestSubfolder")
        );
    }

    #[test]
    fn test_rejects_unsafe_names() {
        for bad in [
            "",
            "/etc/passwd",
            "a//b",
            "trailing/",
            "../escape",
            "a/./b",
            "win\\path",
            "nul\0byte",
        ] {
            assert!(SnapshotName::new(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_dots_inside_segments_are_fine() {
        assert!(SnapshotName::new("v1.2-parser").is_ok());
        assert!(SnapshotName::new(".hidden").is_ok());
    }

    #[test]
    fn test_with_suffix_appends_id() {
        let base = SnapshotName::new("examples-TestMultipleStrings").unwrap();
        assert_eq!(
            base.with_suffix("result2").unwrap().as_str(),
            "examples-TestMultipleStrings-result2"
        );
        assert!(base.with_suffix("x/../y").is_err());
    }

    #[test]
    fn test_parses_from_str() {
        let name: SnapshotName = "a/b".parse().unwrap();
        assert_eq!(name.to_string(), "a/b");
        assert!(SnapshotName::try_from("").is_err());
    }
}
