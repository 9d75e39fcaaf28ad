//! File-backed statuses survive reopening the store.

use std::fs;

use grantkit_permission::{PermissionKind, PermissionStatus};
use grantkit_store::{StatusStore, StoreConfig, StoreError};

fn config(dir: &tempfile::TempDir) -> StoreConfig {
    StoreConfig::new()
        .bundle_id("com.example.app")
        .path(dir.path().join("nested").join("statuses.json"))
}

#[test]
fn every_kind_and_status_round_trips_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    for status in PermissionStatus::ALL {
        {
            let mut store = StatusStore::open(&config(&dir)).unwrap();
            for kind in PermissionKind::ALL {
                store.save(kind, status).unwrap();
                assert_eq!(store.load(kind), Some(status));
            }
        }

        let reopened = StatusStore::open(&config(&dir)).unwrap();
        for kind in PermissionKind::ALL {
            assert_eq!(reopened.load(kind), Some(status), "{kind} after restart");
        }
    }
}

#[test]
fn fresh_store_has_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = StatusStore::open(&config(&dir)).unwrap();
    for kind in PermissionKind::ALL {
        assert_eq!(store.load(kind), None);
    }
}

#[test]
fn cleared_status_stays_cleared_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = StatusStore::open(&config(&dir)).unwrap();
    store
        .save(PermissionKind::Reminders, PermissionStatus::Restricted)
        .unwrap();
    store.clear(PermissionKind::Reminders).unwrap();
    drop(store);

    let reopened = StatusStore::open(&config(&dir)).unwrap();
    assert_eq!(reopened.load(PermissionKind::Reminders), None);
}

#[test]
fn stores_for_different_bundles_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shared.json");
    let mut first = StatusStore::open(&StoreConfig::new().bundle_id("com.a").path(&path)).unwrap();
    first
        .save(PermissionKind::Camera, PermissionStatus::Authorized)
        .unwrap();

    let second = StatusStore::open(&StoreConfig::new().bundle_id("com.b").path(&path)).unwrap();
    assert_eq!(second.load(PermissionKind::Camera), None);
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statuses.json");
    fs::write(&path, "not json").unwrap();
    let err = StatusStore::open(&StoreConfig::new().path(&path)).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn failed_write_leaves_loaded_values_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let parent = dir.path().join("sub");
    let config = StoreConfig::new().path(parent.join("statuses.json"));
    let mut store = StatusStore::open(&config).unwrap();
    store
        .save(PermissionKind::Photos, PermissionStatus::Denied)
        .unwrap();

    fs::remove_dir_all(&parent).unwrap();
    fs::write(&parent, "not a directory").unwrap();

    assert!(
        store
            .save(PermissionKind::Camera, PermissionStatus::Authorized)
            .is_err()
    );
    assert_eq!(store.load(PermissionKind::Camera), None);

    assert!(store.clear(PermissionKind::Photos).is_err());
    assert_eq!(store.load(PermissionKind::Photos), Some(PermissionStatus::Denied));
}
