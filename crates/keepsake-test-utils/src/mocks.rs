//! Mock implementations for testing.

use keepsake_core::TestReporter;
use std::sync::{Arc, Mutex};

/// A message handed to a reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Error(String),
    Fatal(String),
}

/// A [`TestReporter`] that records instead of failing.
///
/// Clones share the same record.
///
/// # Example
///
/// ```rust
/// use keepsake_core::TestReporter;
/// use keepsake_test_utils::mocks::MockReporter;
///
/// let reporter = MockReporter::new("suite-case");
/// reporter.error("boom");
///
/// assert_eq!(reporter.errors(), vec!["boom".to_string()]);
/// assert!(reporter.failed());
/// ```
#[derive(Clone)]
pub struct MockReporter {
    name: String,
    failed: Arc<Mutex<bool>>,
    reports: Arc<Mutex<Vec<Report>>>,
}

impl MockReporter {
    /// Create a reporter for the test called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            failed: Arc::new(Mutex::new(false)),
            reports: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Start out as a test that has already failed.
    pub fn already_failed(self) -> Self {
        *self.failed.lock().unwrap() = true;
        self
    }

    /// Everything reported so far, in order.
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().unwrap().clone()
    }

    /// Messages passed to `error`.
    pub fn errors(&self) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Error(message) => Some(message),
                Report::Fatal(_) => None,
            })
            .collect()
    }

    /// Messages passed to `fatal`.
    pub fn fatals(&self) -> Vec<String> {
        self.reports()
            .into_iter()
            .filter_map(|r| match r {
                Report::Fatal(message) => Some(message),
                Report::Error(_) => None,
            })
            .collect()
    }

    /// Clear recorded reports.
    pub fn clear(&self) {
        self.reports.lock().unwrap().clear();
    }

    fn record(&self, report: Report) {
        *self.failed.lock().unwrap() = true;
        self.reports.lock().unwrap().push(report);
    }
}

impl TestReporter for MockReporter {
    fn failed(&self) -> bool {
        *self.failed.lock().unwrap()
    }

    fn error(&self, message: &str) {
        self.record(Report::Error(message.to_string()));
    }

    fn fatal(&self, message: &str) {
        self.record(Report::Fatal(message.to_string()));
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
