//! Snapshot names derived from the running test.

/// Replace path separators in a test name so it maps to a single file.
///
/// `parser::tests::numbers` becomes `parser-tests-numbers`.
pub fn sanitize_test_name(name: &str) -> String {
    name.replace("::", "-").replace('/', "-")
}

/// Name of the libtest test running on this thread.
///
/// Libtest names each test thread after the test's path. Returns `None` on
/// threads without a name and on the main thread.
pub fn test_name() -> Option<String> {
    let thread = std::thread::current();
    match thread.name() {
        Some("main") | None => None,
        Some(name) => Some(sanitize_test_name(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators_become_dashes() {
        assert_eq!(sanitize_test_name("a::b::c"), "a-b-c");
        assert_eq!(sanitize_test_name("TestSub/case"), "TestSub-case");
        assert_eq!(sanitize_test_name("plain"), "plain");
    }

    #[test]
    fn test_current_test_is_named() {
        assert_eq!(test_name().as_deref(), Some("name-tests-test_current_test_is_named"));
    }

    #[test]
    fn test_unnamed_threads_have_no_test_name() {
        let name = std::thread::spawn(test_name).join().unwrap();
        assert_eq!(name, None);
    }
}
