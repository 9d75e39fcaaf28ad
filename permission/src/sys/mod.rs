//! Platform-specific permission backends.

use std::sync::Arc;

use crate::backend::PermissionBackend;

#[cfg(any(target_os = "ios", target_os = "macos"))]
mod apple;

#[cfg(not(any(target_os = "ios", target_os = "macos")))]
mod stub;

/// The backend for the platform this crate was compiled for.
#[cfg(any(target_os = "ios", target_os = "macos"))]
#[must_use]
pub fn native_backend() -> Arc<dyn PermissionBackend> {
    Arc::new(apple::AppleBackend)
}

/// The backend for the platform this crate was compiled for.
///
/// This platform has no runtime consent model, so every capability reports
/// restricted and no prompt is ever shown.
#[cfg(not(any(target_os = "ios", target_os = "macos")))]
#[must_use]
pub fn native_backend() -> Arc<dyn PermissionBackend> {
    Arc::new(stub::UnsupportedBackend)
}
