//! Where and under which identity statuses are stored.

use std::path::PathBuf;

use crate::StoreError;

/// Configuration for a [`StatusStore`](crate::StatusStore).
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    bundle_id: Option<String>,
    path: Option<PathBuf>,
}

impl StoreConfig {
    /// Bundle identifier used when the app has none.
    pub const DEFAULT_BUNDLE_ID: &'static str = "xyz.kazal.framework.PermissionManager";

    /// File name of the store inside the app's data directory.
    pub const FILE_NAME: &'static str = "permission-status.json";

    /// Creates a config with the default bundle identifier and location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config for an app whose bundle identifier may be unknown,
    /// e.g. straight from `PermissionBackend::bundle_identifier`.
    #[must_use]
    pub fn for_app(bundle_id: Option<String>) -> Self {
        Self {
            bundle_id,
            path: None,
        }
    }

    /// Sets the bundle identifier that prefixes every key.
    #[must_use]
    pub fn bundle_id(mut self, bundle_id: impl Into<String>) -> Self {
        self.bundle_id = Some(bundle_id.into());
        self
    }

    /// Stores statuses in `path` instead of the app's data directory.
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// The bundle identifier keys are prefixed with.
    #[must_use]
    pub fn bundle_identifier(&self) -> &str {
        self.bundle_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(Self::DEFAULT_BUNDLE_ID)
    }

    /// The file the store lives in.
    ///
    /// # Errors
    /// Returns [`StoreError::NoDataDir`] if no path was set and the platform
    /// has no local data directory.
    pub fn resolved_path(&self) -> Result<PathBuf, StoreError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir().ok_or(StoreError::NoDataDir)?;
        Ok(data_dir.join(self.bundle_identifier()).join(Self::FILE_NAME))
    }
}
