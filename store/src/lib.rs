//! Last-known permission status cache.
//!
//! Stores one raw status string per permission kind under the key
//! `<bundle-id>.<display name>`, the way an app would keep it in its user
//! defaults. The permission core never reads or writes it; callers use it
//! around [`PermissionManager`](grantkit_permission::PermissionManager) when
//! they want to remember what they last saw.
//!
//! ```no_run
//! use grantkit_permission::{PermissionKind, PermissionStatus};
//! use grantkit_store::{StatusStore, StoreConfig};
//!
//! # fn main() -> Result<(), grantkit_store::StoreError> {
//! let mut store = StatusStore::open(&StoreConfig::new().bundle_id("com.example.app"))?;
//! store.save(PermissionKind::Camera, PermissionStatus::Authorized)?;
//! assert_eq!(store.load(PermissionKind::Camera), Some(PermissionStatus::Authorized));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod file;
mod memory;

use std::fmt;

use grantkit_permission::{PermissionKind, PermissionStatus};
use log::warn;
use thiserror::Error;

pub use config::StoreConfig;
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Errors that can occur when persisting statuses.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The platform has no per-user data directory to default to.
    #[error("no local data directory available")]
    NoDataDir,
    /// Reading or writing the backing file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The backing file is not a JSON object of strings.
    #[error("malformed store file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key/value store, such as the platform's user defaults.
pub trait KeyValueStore: fmt::Debug {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the value cannot be persisted.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes the value under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the removal cannot be persisted.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Saves and loads the last known status of each permission kind.
#[derive(Debug)]
pub struct StatusStore<S = JsonFileStore> {
    bundle_id: String,
    store: S,
}

impl StatusStore<JsonFileStore> {
    /// Opens the file-backed store described by `config`.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the file location cannot be resolved or an
    /// existing file cannot be read.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let store = JsonFileStore::open(config.resolved_path()?)?;
        Ok(Self::with_store(config.bundle_identifier(), store))
    }
}

impl StatusStore<MemoryStore> {
    /// Creates a store that lives only as long as the process.
    #[must_use]
    pub fn in_memory(config: &StoreConfig) -> Self {
        Self::with_store(config.bundle_identifier(), MemoryStore::default())
    }
}

impl<S: KeyValueStore> StatusStore<S> {
    /// Wraps an existing key/value store.
    #[must_use]
    pub fn with_store(bundle_id: impl Into<String>, store: S) -> Self {
        Self {
            bundle_id: bundle_id.into(),
            store,
        }
    }

    /// Key under which `kind` is stored.
    #[must_use]
    pub fn key(&self, kind: PermissionKind) -> String {
        format!("{}.{}", self.bundle_id, kind.describe())
    }

    /// Remembers `status` for `kind`.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backing store cannot persist it.
    pub fn save(&mut self, kind: PermissionKind, status: PermissionStatus) -> Result<(), StoreError> {
        let key = self.key(kind);
        self.store.set(&key, status.as_str())
    }

    /// Last status saved for `kind`.
    ///
    /// Returns `None` if nothing was saved or the stored value is not a status.
    #[must_use]
    pub fn load(&self, kind: PermissionKind) -> Option<PermissionStatus> {
        let key = self.key(kind);
        let raw = self.store.get(&key)?;
        raw.parse()
            .inspect_err(|err| warn!("ignoring stored value for {key}: {err}"))
            .ok()
    }

    /// Forgets the saved status of `kind`.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backing store cannot persist the removal.
    pub fn clear(&mut self, kind: PermissionKind) -> Result<(), StoreError> {
        let key = self.key(kind);
        self.store.remove(&key)
    }

    /// The underlying key/value store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying key/value store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StatusStore<MemoryStore> {
        StatusStore::in_memory(&StoreConfig::new().bundle_id("com.example.app"))
    }

    #[test]
    fn key_combines_bundle_and_display_name() {
        assert_eq!(
            store().key(PermissionKind::LocationWhileUsing),
            "com.example.app.Location While Using"
        );
        assert_eq!(store().key(PermissionKind::Motion), "com.example.app.Core Motion");
    }

    #[test]
    fn values_are_raw_identifiers() {
        let mut store = store();
        store
            .save(PermissionKind::Photos, PermissionStatus::NotDetermined)
            .unwrap();
        assert_eq!(
            store.store().get("com.example.app.Photos").as_deref(),
            Some("notDetermined")
        );
    }

    #[test]
    fn unsaved_and_garbage_values_load_as_none() {
        let mut store = store();
        assert_eq!(store.load(PermissionKind::Camera), None);
        store
            .store_mut()
            .set("com.example.app.Camera", "maybe")
            .unwrap();
        assert_eq!(store.load(PermissionKind::Camera), None);
    }

    #[test]
    fn clear_forgets_one_kind() {
        let mut store = store();
        store.save(PermissionKind::Camera, PermissionStatus::Denied).unwrap();
        store.save(PermissionKind::Contacts, PermissionStatus::Denied).unwrap();
        store.clear(PermissionKind::Camera).unwrap();
        assert_eq!(store.load(PermissionKind::Camera), None);
        assert_eq!(store.load(PermissionKind::Contacts), Some(PermissionStatus::Denied));
    }
}
