//! End-to-end reconciliation against real snapshot directories.

use keepsake_core::{
    dump, Config, DumpMode, Item, Outcome, Override, Reconciler, Settings, SnapshotName,
    SnapshotStore, StorageError,
};
use keepsake_test_utils::assertions::{assert_file_equals, assert_file_missing};
use keepsake_test_utils::SnapshotSandbox;
use mockall::mock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

mock! {
    Store {}

    impl SnapshotStore for Store {
        fn read(&self, name: &SnapshotName) -> Result<Option<String>, StorageError>;
        fn write(&self, name: &SnapshotName, contents: &str) -> Result<(), StorageError>;
        fn exists(&self, name: &SnapshotName) -> Result<bool, StorageError>;
        fn remove(&self, name: &SnapshotName) -> Result<(), StorageError>;
        fn list(&self) -> Result<Vec<SnapshotName>, StorageError>;
        fn location(&self, name: &SnapshotName) -> String;
    }
}

fn disk_full() -> StorageError {
    StorageError::io(
        "/snapshots/x",
        std::io::Error::other("disk full"),
    )
}

#[test]
fn test_first_run_creates_then_later_runs_match() {
    let _ = keepsake_util::log::init_for_tests();
    let sandbox = SnapshotSandbox::new();
    let reconciler = Reconciler::new(sandbox.config());
    let name = sandbox.name("TestString");

    let err = reconciler
        .check(&name, &[Item::from("Hello world")])
        .into_result()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "snapshot created for test TestString, with contents:\nHello world\n"
    );
    assert_file_equals(&sandbox.path("TestString"), "Hello world\n");

    assert!(reconciler.check(&name, &[Item::from("Hello world")]).is_match());
}

#[test]
fn test_mismatch_reports_a_unified_diff() {
    let sandbox = SnapshotSandbox::new().with_baseline("greeting", "Hello\n");
    let reconciler = Reconciler::new(sandbox.config());

    let err = reconciler
        .check(&sandbox.name("greeting"), &[Item::from("Hello!")])
        .into_result()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "snapshot not equal:\n--- Previous\n+++ Current\n@@ -1 +1 @@\n-Hello\n+Hello!\n"
    );
    assert_file_equals(&sandbox.path("greeting"), "Hello\n");
}

#[test]
fn test_update_mode_rewrites_and_reports() {
    let sandbox = SnapshotSandbox::new().with_baseline("greeting", "Hello\n");
    let reconciler = Reconciler::new(sandbox.updating_config());
    let name = sandbox.name("greeting");

    match reconciler.check(&name, &[Item::from("Hello new world")]) {
        Outcome::Updated { diff, .. } => {
            assert!(diff.contains("-Hello\n"));
            assert!(diff.contains("+Hello new world\n"));
        }
        other => panic!("expected Updated, got {other:?}"),
    }
    assert_file_equals(&sandbox.path("greeting"), "Hello new world\n");

    // Nothing left to update
    assert!(reconciler.check(&name, &[Item::from("Hello new world")]).is_match());
}

#[test]
fn test_silent_update_when_changes_are_not_failures() {
    let sandbox = SnapshotSandbox::new().with_baseline("greeting", "Hello\n");
    let config = sandbox
        .updating_config()
        .with_overrides([Override::FailOnUpdate(false)]);
    let reconciler = Reconciler::new(config);

    assert!(reconciler
        .check(&sandbox.name("greeting"), &[Item::from("Goodbye")])
        .is_match());
    assert_file_equals(&sandbox.path("greeting"), "Goodbye\n");
}

#[test]
fn test_missing_baseline_without_creation() {
    let sandbox = SnapshotSandbox::new();
    let config = sandbox
        .config()
        .with_overrides([Override::CreateNewAutomatically(false)]);
    let reconciler = Reconciler::new(config);

    let err = reconciler
        .check(&sandbox.name("TestMissing"), &[Item::from("x")])
        .into_result()
        .unwrap_err();

    assert_eq!(err.to_string(), "snapshot TestMissing does not exist");
    assert_file_missing(&sandbox.path("TestMissing"));
}

#[test]
fn test_legacy_structured_baselines_still_match() {
    let legacy = dump(&[Item::from("Hello"), Item::from(&b"\x00\x01"[..])], DumpMode::Structured);
    let sandbox = SnapshotSandbox::new().with_baseline("legacy", &legacy);
    let reconciler = Reconciler::new(sandbox.updating_config());

    let outcome = reconciler.check(
        &sandbox.name("legacy"),
        &[Item::from("Hello"), Item::from(&b"\x00\x01"[..])],
    );

    assert!(outcome.is_match());
    // Still the old format: a match never rewrites
    assert_file_equals(&sandbox.path("legacy"), &legacy);
}

#[test]
fn test_nested_names_and_extensions() {
    let sandbox = SnapshotSandbox::new().with_extension(".snap");
    let reconciler = Reconciler::new(sandbox.config().with_fail_on_update(false));

    assert!(reconciler
        .check(&sandbox.name("advanced/TestSubfolder"), &[Item::from("Hello world")])
        .is_match());

    assert_file_equals(&sandbox.path("advanced/TestSubfolder"), "Hello world\n");
    assert!(sandbox
        .root()
        .join("advanced")
        .join("TestSubfolder.snap")
        .is_file());
}

#[derive(Serialize)]
struct Inventory {
    owner: String,
    counts: HashMap<String, u32>,
}

fn inventory(order: &[(&str, u32)]) -> Inventory {
    let mut counts = HashMap::new();
    for (k, v) in order {
        counts.insert(k.to_string(), *v);
    }
    Inventory {
        owner: "warehouse".into(),
        counts,
    }
}

#[test]
fn test_unordered_maps_are_deterministic_across_checks() {
    let sandbox = SnapshotSandbox::new();
    let reconciler = Reconciler::new(sandbox.config().with_fail_on_update(false));
    let name = sandbox.name("inventory");
    let entries = [("bolts", 10), ("nuts", 3), ("washers", 7), ("screws", 12), ("nails", 1)];

    let first = Item::value(&inventory(&entries)).unwrap();
    assert!(reconciler.check(&name, &[first]).is_match());

    let mut reversed = entries;
    reversed.reverse();
    for _ in 0..10 {
        let again = Item::value(&inventory(&reversed)).unwrap();
        assert!(reconciler.check(&name, &[again]).is_match());
    }

    let recorded = sandbox.read("inventory").unwrap();
    assert!(recorded.starts_with("(Inventory) {\n"));
    let bolts = recorded.find("\"bolts\"").unwrap();
    let washers = recorded.find("\"washers\"").unwrap();
    assert!(bolts < washers);
}

#[test]
fn test_hash_and_btree_maps_dump_identically() {
    let hashed: HashMap<i32, &str> = [(3, "!"), (1, "Hello"), (2, "World")].into_iter().collect();
    let ordered: BTreeMap<i32, &str> = hashed.iter().map(|(k, v)| (*k, *v)).collect();

    assert_eq!(
        dump(&[Item::value(&hashed).unwrap()], DumpMode::Raw),
        dump(&[Item::value(&ordered).unwrap()], DumpMode::Raw)
    );
}

#[test]
fn test_parallel_checks_do_not_interfere() {
    let sandbox = SnapshotSandbox::new();
    let shared = Arc::new(sandbox.config());

    std::thread::scope(|scope| {
        for i in 0..8 {
            let shared = shared.clone();
            let sandbox = &sandbox;
            scope.spawn(move || {
                // Half the threads scope an override to themselves
                let config = if i % 2 == 0 {
                    shared.with_overrides([Override::FailOnUpdate(false)])
                } else {
                    (*shared).clone()
                };
                let reconciler = Reconciler::new(config);
                let name = sandbox.name(&format!("parallel-{i}"));
                let outcome = reconciler.check(&name, &[Item::from(format!("value {i}"))]);

                if i % 2 == 0 {
                    assert!(outcome.is_match());
                } else {
                    assert!(matches!(outcome, Outcome::Created { .. }));
                }
            });
        }
    });

    assert!(shared.fail_on_update());
    assert_eq!(sandbox.file_count(), 8);
    for i in 0..8 {
        assert_eq!(
            sandbox.read(&format!("parallel-{i}")),
            Some(format!("value {i}\n"))
        );
    }
}

#[test]
fn test_settings_file_layers_over_defaults() {
    let sandbox = SnapshotSandbox::new();
    std::fs::write(
        sandbox.root().join("keepsake.json"),
        r#"{ "file_extension": ".snap", "fail_on_update": false }"#,
    )
    .unwrap();

    let settings = Settings::load_from_dir(sandbox.root()).unwrap().unwrap();
    let config = Config::default()
        .with_snapshot_dir(sandbox.root().join("snapshots"))
        .with_should_update(|| false)
        .with_settings(settings);
    let reconciler = Reconciler::new(config);

    assert!(reconciler
        .check(&sandbox.name("layered"), &[Item::from("x")])
        .is_match());
    assert!(sandbox.root().join("snapshots").join("layered.snap").is_file());
}

#[test]
fn test_read_failure_is_reported_once_and_never_written() {
    let mut store = MockStore::new();
    store.expect_read().times(1).returning(|_| Err(disk_full()));
    store.expect_write().times(0);

    let reconciler = Reconciler::with_store(Config::default().with_should_update(|| true), store);
    let outcome = reconciler.check(&SnapshotName::new("broken").unwrap(), &[Item::from("x")]);

    match outcome {
        Outcome::StorageError(StorageError::Io { source, .. }) => {
            assert_eq!(source.to_string(), "disk full");
        }
        other => panic!("expected StorageError, got {other:?}"),
    }
}

#[test]
fn test_write_failure_on_create_is_not_retried() {
    let mut store = MockStore::new();
    store.expect_read().times(1).returning(|_| Ok(None));
    store.expect_write().times(1).returning(|_, _| Err(disk_full()));

    let reconciler = Reconciler::with_store(Config::default(), store);
    let outcome = reconciler.check(&SnapshotName::new("broken").unwrap(), &[Item::from("x")]);

    assert!(matches!(outcome, Outcome::StorageError(StorageError::Io { .. })));
}

#[test]
fn test_write_failure_on_update_is_reported() {
    let mut store = MockStore::new();
    store
        .expect_read()
        .times(1)
        .returning(|_| Ok(Some("old\n".to_string())));
    store
        .expect_write()
        .withf(|name, contents| name.as_str() == "broken" && contents == "new\n")
        .times(1)
        .returning(|_, _| Err(disk_full()));

    let reconciler = Reconciler::with_store(Config::default().with_should_update(|| true), store);
    let outcome = reconciler.check(&SnapshotName::new("broken").unwrap(), &[Item::from("new")]);

    let err = outcome.into_result().unwrap_err();
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_mismatch_without_update_never_writes() {
    let mut store = MockStore::new();
    store
        .expect_read()
        .times(1)
        .returning(|_| Ok(Some("old\n".to_string())));
    store.expect_write().times(0);

    let reconciler = Reconciler::with_store(Config::default().with_should_update(|| false), store);
    let outcome = reconciler.check(&SnapshotName::new("stable").unwrap(), &[Item::from("new")]);

    assert!(matches!(outcome, Outcome::Mismatched { .. }));
}
