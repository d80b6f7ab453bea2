//! [`TestReporter`] for the built-in test harness.

use crate::name::test_name;
use keepsake_core::TestReporter;
use std::cell::RefCell;

/// Reports snapshot failures by panicking, the way libtest expects.
///
/// `fatal` panics immediately. `error` records the message and the test keeps
/// going; recorded messages are raised together when the reporter is dropped.
/// Nothing is raised if the thread is already unwinding.
pub struct LibtestReporter {
    name: String,
    errors: RefCell<Vec<String>>,
}

impl LibtestReporter {
    /// Reporter for the test running on this thread.
    ///
    /// Outside a libtest thread the name falls back to `unnamed-test`.
    pub fn new() -> Self {
        Self::named(test_name().unwrap_or_else(|| "unnamed-test".to_string()))
    }

    /// Reporter with an explicit test name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Messages recorded so far.
    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Default for LibtestReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TestReporter for LibtestReporter {
    fn failed(&self) -> bool {
        !self.errors.borrow().is_empty() || std::thread::panicking()
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }

    fn fatal(&self, message: &str) {
        panic!("{message}");
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

impl Drop for LibtestReporter {
    fn drop(&mut self) {
        let errors = self.errors.get_mut();
        if errors.is_empty() || std::thread::panicking() {
            return;
        }
        let message = std::mem::take(errors).join("\n");
        panic!("{message}");
    }
}
