//! A configured entry point for snapshot checks.

use crate::global;
use crate::name::sanitize_test_name;
use keepsake_core::{
    report, Config, Item, Outcome, Override, Reconciler, SnapshotName, SnapshotResult,
    TestReporter,
};
use serde::Serialize;
use tracing::debug;

/// Snapshot checks under one configuration.
///
/// A handle owns its own [`Config`]; deriving a new handle never changes the
/// process-wide default or any other handle.
#[derive(Debug, Clone)]
pub struct Snapshotter {
    config: Config,
}

impl Snapshotter {
    /// A handle over the global default with `overrides` applied.
    pub fn new<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = Override>,
    {
        Self {
            config: global::get().with_overrides(overrides),
        }
    }

    /// A handle over an explicit configuration.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Derive a handle with further overrides.
    pub fn with_overrides<I>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = Override>,
    {
        Self {
            config: self.config.with_overrides(overrides),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compare `items` against the snapshot `name`.
    ///
    /// An invalid name is reported as a storage error.
    pub fn check(&self, name: &str, items: &[Item]) -> Outcome {
        match SnapshotName::new(name) {
            Ok(name) => self.reconciler().check(&name, items),
            Err(e) => Outcome::StorageError(e),
        }
    }

    /// Compare `items` against the snapshot `name`; anything but a match is
    /// an error.
    pub fn snapshot(&self, name: &str, items: &[Item]) -> SnapshotResult<()> {
        self.check(name, items).into_result()
    }

    /// Like [`snapshot`](Self::snapshot) for one of several snapshots of the
    /// same test, stored as `name-id`.
    pub fn snapshot_multi(&self, name: &str, id: &str, items: &[Item]) -> SnapshotResult<()> {
        let name = SnapshotName::new(name)?.with_suffix(id)?;
        self.reconciler().check(&name, items).into_result()
    }

    /// Snapshot a single serializable value.
    pub fn snapshot_value<T>(&self, name: &str, value: &T) -> SnapshotResult<()>
    where
        T: Serialize + ?Sized,
    {
        let item = Item::value(value)?;
        self.snapshot(name, &[item])
    }

    /// Snapshot `items` under the reporter's test name and report the result.
    ///
    /// Does nothing if the test has already failed.
    pub fn snapshot_t<R>(&self, reporter: &R, items: &[Item])
    where
        R: TestReporter + ?Sized,
    {
        if reporter.failed() {
            debug!(test = %reporter.name(), "Skipping snapshot of failed test");
            return;
        }

        let name = sanitize_test_name(&reporter.name());
        let outcome = self.check(&name, items);
        report(&self.config, reporter, outcome);
    }

    fn reconciler(&self) -> Reconciler {
        Reconciler::new(self.config.clone())
    }
}

impl Default for Snapshotter {
    /// A handle over the global default as it is right now.
    fn default() -> Self {
        Self::from_config((*global::get()).clone())
    }
}
