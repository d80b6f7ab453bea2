//! Testing utilities, fixtures, and mocks for keepsake.
//!
//! - **Fixtures**: temporary snapshot directories with seeded baselines
//! - **Mocks**: a recording [`TestReporter`](keepsake_core::TestReporter)
//! - **Assertions**: file and string assertions with readable failures
//!
//! # Example Usage
//!
//! ```rust
//! use keepsake_core::{Item, Reconciler};
//! use keepsake_test_utils::SnapshotSandbox;
//!
//! let sandbox = SnapshotSandbox::new().with_baseline("greeting", "Hello\n");
//! let reconciler = Reconciler::new(sandbox.config());
//!
//! let outcome = reconciler.check(&sandbox.name("greeting"), &[Item::from("Hello")]);
//! assert!(outcome.is_match());
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mocks;

pub use fixtures::SnapshotSandbox;
pub use mocks::MockReporter;
