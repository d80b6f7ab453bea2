//! Path utilities.
//!
//! Snapshot names map onto relative paths below a snapshot directory. These
//! helpers keep that mapping lexical so it works before anything exists on
//! disk.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Normalize a path by removing `.` and `..` components.
///
/// Unlike `canonicalize`, this doesn't require the path to exist.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                result.pop();
            }
            Component::CurDir => {}
            _ => {
                result.push(component);
            }
        }
    }

    result
}

/// Check if a path is lexically within a base directory.
pub fn is_within(path: &Path, base: &Path) -> bool {
    normalize(path).starts_with(normalize(base))
}

/// Join a relative path onto `base`, refusing anything that escapes it.
///
/// Returns `None` for absolute paths and for paths that climb out of `base`.
pub fn safe_join(base: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_absolute() || path.has_root() {
        return None;
    }

    // Lexical normalization would silently swallow a leading `..` on a
    // relative base, so reject parent components outright.
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return None;
    }

    let joined = base.join(path);
    if is_within(&joined, base) {
        Some(joined)
    } else {
        None
    }
}

/// Append `suffix` to the final component of `path`.
///
/// `Path::set_extension` would replace anything after the last dot, which
/// breaks names such as `v1.2-parser`.
pub fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Sibling path used to stage a write before renaming it over `path`.
pub fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", file_name, std::process::id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize() {
        let path = Path::new("/home/user/./project/../project/src");
        assert_eq!(normalize(path), PathBuf::from("/home/user/project/src"));
    }

    #[test]
    fn test_is_within() {
        let base = PathBuf::from("/home/user/project");
        assert!(is_within(Path::new("/home/user/project/.snapshots"), &base));
        assert!(!is_within(Path::new("/home/user/other"), &base));
        assert!(!is_within(Path::new("/home/user/project/../other"), &base));
    }

    #[test]
    fn test_safe_join() {
        let base = PathBuf::from(".snapshots");

        assert_eq!(
            safe_join(&base, Path::new("pkg/test_one")),
            Some(PathBuf::from(".snapshots/pkg/test_one"))
        );
        assert!(safe_join(&base, Path::new("../../etc/passwd")).is_none());
        assert!(safe_join(&base, Path::new("pkg/../../escape")).is_none());
        assert!(safe_join(&base, Path::new("/etc/passwd")).is_none());
    }

    #[test]
    fn test_append_suffix_keeps_dots() {
        let path = Path::new(".snapshots/v1.2-parser");
        assert_eq!(
            append_suffix(path, ".snap"),
            PathBuf::from(".snapshots/v1.2-parser.snap")
        );
        assert_eq!(append_suffix(path, ""), path.to_path_buf());
    }

    #[test]
    fn test_temp_sibling_stays_in_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("nested").join("name.snap");
        let temp = temp_sibling(&target);

        assert_eq!(temp.parent(), target.parent());
        assert_ne!(temp, target);
        assert!(temp.to_string_lossy().ends_with(".tmp"));
    }
}
