//! The snapshot decision engine.

use crate::config::Config;
use crate::diff::diff;
use crate::outcome::Outcome;
use keepsake_dump::{dump, Item};
use keepsake_storage::{FileStore, SnapshotName, SnapshotStore, StorageError};
use tracing::{debug, info, warn};

/// Compares candidate values against recorded baselines.
///
/// The reconciler holds no state between checks: every call serializes the
/// candidate, reads the baseline afresh and re-evaluates the update predicate.
/// Storage failures are returned as [`Outcome::StorageError`] and never
/// retried.
#[derive(Debug, Clone)]
pub struct Reconciler<S = FileStore> {
    config: Config,
    store: S,
}

impl Reconciler<FileStore> {
    /// Create a reconciler backed by files at the configured location.
    pub fn new(config: Config) -> Self {
        let store = config.file_store();
        Self { config, store }
    }
}

impl<S: SnapshotStore> Reconciler<S> {
    /// Create a reconciler over any store.
    pub fn with_store(config: Config, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check `items` against the baseline recorded under `name`.
    pub fn check(&self, name: &SnapshotName, items: &[Item]) -> Outcome {
        let candidate = dump(items, self.config.dump_mode());

        let baseline = match self.store.read(name) {
            Ok(Some(baseline)) => baseline,
            Ok(None) => return self.record_missing(name, candidate),
            Err(e) => {
                warn!(snapshot = %name, error = %e, "Failed to read snapshot");
                return Outcome::StorageError(e);
            }
        };

        if candidate == baseline {
            debug!(snapshot = %name, "Snapshot matched");
            return Outcome::Matched;
        }

        if self.matches_equivalent_mode(items, &baseline) {
            debug!(snapshot = %name, "Snapshot matched an equivalent dump mode");
            return Outcome::Matched;
        }

        let changes = diff(&baseline, &candidate);

        if !self.config.should_update() {
            debug!(snapshot = %name, "Snapshot mismatched");
            return Outcome::Mismatched {
                name: name.clone(),
                diff: changes,
            };
        }

        if let Err(e) = self.store.write(name, &candidate) {
            warn!(snapshot = %name, error = %e, "Failed to update snapshot");
            return Outcome::StorageError(e);
        }
        info!(snapshot = %name, location = %self.store.location(name), "Updated snapshot");

        if self.config.fail_on_update() {
            Outcome::Updated {
                name: name.clone(),
                diff: changes,
            }
        } else {
            Outcome::Matched
        }
    }

    fn record_missing(&self, name: &SnapshotName, candidate: String) -> Outcome {
        if !self.config.create_new_automatically() {
            debug!(snapshot = %name, "Snapshot missing and creation disabled");
            return Outcome::StorageError(StorageError::no_baseline(name));
        }

        if let Err(e) = self.store.write(name, &candidate) {
            warn!(snapshot = %name, error = %e, "Failed to create snapshot");
            return Outcome::StorageError(e);
        }
        info!(snapshot = %name, location = %self.store.location(name), "Created snapshot");

        if self.config.fail_on_update() {
            Outcome::Created {
                name: name.clone(),
                contents: candidate,
            }
        } else {
            Outcome::Matched
        }
    }

    /// Whether the baseline was written by one of the older dump modes.
    ///
    /// Only used to decide a match; what gets written is always the current
    /// mode's output.
    fn matches_equivalent_mode(&self, items: &[Item], baseline: &str) -> bool {
        self.config
            .equivalent_modes()
            .iter()
            .filter(|mode| **mode != self.config.dump_mode())
            .any(|mode| dump(items, *mode) == baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keepsake_dump::DumpMode;
    use keepsake_storage::MemoryStore;

    fn name(s: &str) -> SnapshotName {
        SnapshotName::new(s).unwrap()
    }

    fn config(update: bool) -> Config {
        Config::default().with_should_update(move || update)
    }

    #[test]
    fn test_creates_missing_baseline() {
        let reconciler = Reconciler::with_store(config(false), MemoryStore::new());

        let outcome = reconciler.check(&name("new"), &[Item::from("Hello world")]);

        match outcome {
            Outcome::Created { contents, .. } => assert_eq!(contents, "Hello world\n"),
            other => panic!("expected Created, got {other:?}"),
        }
        assert_eq!(
            reconciler.store().read(&name("new")).unwrap().as_deref(),
            Some("Hello world\n")
        );
    }

    #[test]
    fn test_silent_creation_when_not_failing_on_update() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::with_store(config(false).with_fail_on_update(false), &store);

        assert!(reconciler.check(&name("new"), &[Item::from("x")]).is_match());
        assert!(store.exists(&name("new")).unwrap());
    }

    #[test]
    fn test_missing_baseline_without_creation_is_reported() {
        let store = MemoryStore::new();
        let reconciler =
            Reconciler::with_store(config(true).with_create_new_automatically(false), &store);

        let outcome = reconciler.check(&name("absent"), &[Item::from("x")]);

        assert!(matches!(
            outcome,
            Outcome::StorageError(StorageError::NoBaseline { .. })
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_equal_baseline_matches() {
        let store = MemoryStore::new().with_snapshot(name("same"), "Hello\n");
        let reconciler = Reconciler::with_store(config(true), &store);

        assert!(reconciler.check(&name("same"), &[Item::from("Hello")]).is_match());
    }

    #[test]
    fn test_mismatch_leaves_baseline_alone() {
        let store = MemoryStore::new().with_snapshot(name("greeting"), "Hello\n");
        let reconciler = Reconciler::with_store(config(false), &store);

        let outcome = reconciler.check(&name("greeting"), &[Item::from("Hello!")]);

        let diff = outcome.diff().unwrap().to_string();
        assert!(matches!(outcome, Outcome::Mismatched { .. }));
        assert!(diff.contains("-Hello\n"));
        assert!(diff.contains("+Hello!\n"));
        assert_eq!(
            store.read(&name("greeting")).unwrap().as_deref(),
            Some("Hello\n")
        );
    }

    #[test]
    fn test_update_is_reported_by_default() {
        let store = MemoryStore::new().with_snapshot(name("greeting"), "Hello\n");
        let reconciler = Reconciler::with_store(config(true), &store);

        let outcome = reconciler.check(&name("greeting"), &[Item::from("Hello new world")]);

        assert!(matches!(outcome, Outcome::Updated { .. }));
        assert_eq!(
            store.read(&name("greeting")).unwrap().as_deref(),
            Some("Hello new world\n")
        );
    }

    #[test]
    fn test_legacy_structured_baseline_matches_raw_candidate() {
        let legacy = dump(&[Item::from("Hello")], DumpMode::Structured);
        let store = MemoryStore::new().with_snapshot(name("legacy"), legacy.clone());
        let reconciler = Reconciler::with_store(config(true), &store);

        assert!(reconciler.check(&name("legacy"), &[Item::from("Hello")]).is_match());
        // A match never rewrites the baseline into the new format
        assert_eq!(store.read(&name("legacy")).unwrap(), Some(legacy));
    }

    #[test]
    fn test_equivalence_can_be_disabled() {
        let legacy = dump(&[Item::from("Hello")], DumpMode::Structured);
        let store = MemoryStore::new().with_snapshot(name("legacy"), legacy);
        let reconciler = Reconciler::with_store(
            config(false).with_equivalent_modes(Vec::new()),
            &store,
        );

        let outcome = reconciler.check(&name("legacy"), &[Item::from("Hello")]);
        assert!(matches!(outcome, Outcome::Mismatched { .. }));
    }

    #[test]
    fn test_non_utf8_binary_changes_are_detected() {
        let store = MemoryStore::new();
        let reconciler = Reconciler::with_store(config(false), &store);

        let first = reconciler.check(&name("blob"), &[Item::binary(vec![0x66, 0xff])]);
        assert!(matches!(first, Outcome::Created { .. }));

        let second = reconciler.check(&name("blob"), &[Item::binary(vec![0x66, 0xfe])]);
        match second {
            Outcome::Mismatched { diff, .. } => {
                assert!(diff.contains("66 ff"));
                assert!(diff.contains("66 fe"));
            }
            other => panic!("expected Mismatched, got {other:?}"),
        }

        let same = reconciler.check(&name("blob"), &[Item::binary(vec![0x66, 0xff])]);
        assert!(same.is_match());
    }
}
