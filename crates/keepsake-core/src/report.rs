//! Adapter between outcomes and a test harness.

use crate::config::Config;
use crate::outcome::Outcome;
use tracing::debug;

/// The parts of a test harness a snapshot check needs.
pub trait TestReporter {
    /// Whether the current test has already failed.
    fn failed(&self) -> bool;

    /// Record a failure and let the test continue.
    fn error(&self, message: &str);

    /// Record a failure and stop the test.
    fn fatal(&self, message: &str);

    /// The current test's name.
    fn name(&self) -> String;
}

/// Hand `outcome` to `reporter`.
///
/// A match reports nothing. Any other outcome is reported through
/// [`TestReporter::fatal`] when `fatal_on_mismatch` is set, otherwise through
/// [`TestReporter::error`].
pub fn report<R>(config: &Config, reporter: &R, outcome: Outcome)
where
    R: TestReporter + ?Sized,
{
    let kind = outcome.kind();
    let Err(err) = outcome.into_result() else {
        return;
    };

    debug!(test = %reporter.name(), outcome = kind, "Reporting snapshot failure");
    let message = err.to_string();
    if config.fatal_on_mismatch() {
        reporter.fatal(&message);
    } else {
        reporter.error(&message);
    }
}
