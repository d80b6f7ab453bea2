//! Assertion helpers for snapshot tests.

use std::path::Path;

/// Assert that a file's content equals expected text exactly.
pub fn assert_file_equals(path: &Path, expected: &str) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));

    if content != expected {
        panic!(
            "File {} content does not match expected.\nDiff:\n{}",
            path.display(),
            line_diff(expected, &content)
        );
    }
}

/// Assert that a file contains specific text.
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));

    assert!(
        content.contains(expected),
        "File {} does not contain expected text.\nExpected to find: {}\nActual content:\n{}",
        path.display(),
        expected,
        content
    );
}

/// Assert that a file does not exist.
pub fn assert_file_missing(path: &Path) {
    assert!(!path.exists(), "File {} unexpectedly exists", path.display());
}

/// Assert that two strings are equal, with a line diff on failure.
pub fn assert_strings_equal(actual: &str, expected: &str) {
    if actual != expected {
        panic!("Strings are not equal.\nDiff:\n{}", line_diff(expected, actual));
    }
}

fn line_diff(expected: &str, actual: &str) -> String {
    let diff = similar::TextDiff::from_lines(expected, actual);
    let mut output = String::new();

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            similar::ChangeTag::Delete => "-",
            similar::ChangeTag::Insert => "+",
            similar::ChangeTag::Equal => " ",
        };
        output.push_str(sign);
        output.push_str(change.value());
        if change.missing_newline() {
            output.push('\n');
        }
    }

    output
}

/// Assert that a string contains a substring.
#[macro_export]
macro_rules! assert_str_contains {
    ($haystack:expr, $needle:expr) => {
        if !$haystack.contains($needle) {
            panic!(
                "String does not contain expected substring.\nExpected to find: {}\nIn string:\n{}",
                $needle, $haystack
            );
        }
    };
}
