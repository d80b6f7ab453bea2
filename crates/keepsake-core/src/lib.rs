//! Snapshot reconciliation engine for keepsake.
//!
//! A check serializes the candidate values, reads the recorded baseline and
//! decides between matching, creating, updating or reporting a mismatch:
//!
//! ```no_run
//! use keepsake_core::{Config, Item, Outcome, Reconciler, SnapshotName};
//!
//! let reconciler = Reconciler::new(Config::default().with_snapshot_dir("testdata"));
//! let name = SnapshotName::new("greeting").unwrap();
//!
//! match reconciler.check(&name, &[Item::from("Hello world")]) {
//!     Outcome::Matched => {}
//!     other => panic!("{}", other.into_result().unwrap_err()),
//! }
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod outcome;
pub mod reconcile;
pub mod report;
pub mod settings;

pub use config::{Config, Override, UpdatePredicate};
pub use diff::diff;
pub use error::{CoreError, CoreResult, SnapshotError, SnapshotResult};
pub use outcome::Outcome;
pub use reconcile::Reconciler;
pub use report::{report, TestReporter};
pub use settings::Settings;

pub use keepsake_dump::{dump, DumpMode, Item, Node};
pub use keepsake_storage::{FileStore, MemoryStore, SnapshotName, SnapshotStore, StorageError};
