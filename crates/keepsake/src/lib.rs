//! Snapshot testing with readable, diffable baselines.
//!
//! The first time a test runs, its values are serialized and recorded below
//! `.snapshots/`. Later runs compare against the recording and fail with a
//! unified diff when something changed. Set `UPDATE_SNAPSHOTS` to accept the
//! new values.
//!
//! ```no_run
//! use keepsake::{assert_snapshot, Item};
//! use std::collections::HashMap;
//!
//! #[test]
//! fn test_renders_greeting() {
//!     let mut greeting = HashMap::new();
//!     greeting.insert(1, "Hello");
//!     greeting.insert(2, "World");
//!
//!     assert_snapshot!("plain text", Item::value(&greeting).unwrap());
//! }
//! ```
//!
//! Settings can be scoped to a handle instead of the process-wide default:
//!
//! ```no_run
//! use keepsake::{Item, Override, Snapshotter};
//!
//! let snapshotter = Snapshotter::new([
//!     Override::SnapshotDir("testdata".into()),
//!     Override::FileExtension(".snap".into()),
//! ]);
//! snapshotter.snapshot("greeting", &[Item::from("Hello")]).unwrap();
//! ```

pub mod global;
pub mod libtest;
pub mod name;
pub mod snapshotter;

pub use libtest::LibtestReporter;
pub use name::{sanitize_test_name, test_name};
pub use snapshotter::Snapshotter;

pub use keepsake_core::{
    diff, Config, DumpMode, Item, Node, Outcome, Override, SnapshotError, SnapshotName,
    SnapshotResult, Settings, TestReporter,
};
pub use keepsake_dump::{to_node, unordered, DumpError, Unordered};
pub use keepsake_util::log;

use serde::Serialize;

/// Check `items` against the snapshot `name` using the global default.
pub fn check(name: &str, items: &[Item]) -> Outcome {
    Snapshotter::default().check(name, items)
}

/// Snapshot `items` under `name` using the global default.
pub fn snapshot(name: &str, items: &[Item]) -> SnapshotResult<()> {
    Snapshotter::default().snapshot(name, items)
}

/// Snapshot `items` under `name-id` using the global default.
pub fn snapshot_multi(name: &str, id: &str, items: &[Item]) -> SnapshotResult<()> {
    Snapshotter::default().snapshot_multi(name, id, items)
}

/// Snapshot one serializable value under `name` using the global default.
pub fn snapshot_value<T: Serialize + ?Sized>(name: &str, value: &T) -> SnapshotResult<()> {
    Snapshotter::default().snapshot_value(name, value)
}

/// Snapshot `items` under the reporter's test name using the global default.
pub fn snapshot_t<R: TestReporter + ?Sized>(reporter: &R, items: &[Item]) {
    Snapshotter::default().snapshot_t(reporter, items)
}

/// Snapshot the given values under the current test's name.
///
/// Every argument must convert into an [`Item`]. A mismatch fails the test
/// once the statement completes; with `fatal_on_mismatch` it fails at once.
#[macro_export]
macro_rules! assert_snapshot {
    ($($item:expr),+ $(,)?) => {
        $crate::snapshot_t(
            &$crate::LibtestReporter::new(),
            &[$($crate::Item::from($item)),+],
        )
    };
}
