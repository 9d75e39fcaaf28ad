//! Backend for platforms without runtime privacy prompts.
//!
//! Capabilities are governed outside the app (device files, user groups,
//! sandbox portals), so nothing here can be granted at runtime.

use std::sync::Arc;

use log::warn;

use crate::backend::{
    GrantReply, LocationDelegate, LocationManagerHandle, PermissionBackend, PhotoReply,
};
use crate::native::{
    AccessRequest, AuthorizationStatus, LocationAuthorization, LocationLevel, NativeError,
    NotificationOptions, OsVersion, RecordPermission, Subsystem,
};

/// Reports every capability as restricted and never prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedBackend;

fn unsupported() -> NativeError {
    NativeError::new(-1, "permission prompts are not supported on this platform")
}

impl PermissionBackend for UnsupportedBackend {
    fn authorization_status(&self, _subsystem: Subsystem) -> AuthorizationStatus {
        AuthorizationStatus::Restricted
    }

    fn location_services_enabled(&self) -> bool {
        false
    }

    fn location_authorization(&self) -> LocationAuthorization {
        LocationAuthorization::Restricted
    }

    fn record_permission(&self) -> RecordPermission {
        RecordPermission::Denied
    }

    // No mobile OS, so every version gate picks the legacy path.
    fn os_version(&self) -> OsVersion {
        OsVersion::new(0, 0)
    }

    fn request_access(&self, request: AccessRequest, reply: GrantReply) {
        warn!("{request:?} access requested on an unsupported platform");
        reply(Err(unsupported()));
    }

    fn request_photo_authorization(&self, reply: PhotoReply) {
        reply(AuthorizationStatus::Restricted);
    }

    fn register_notification_settings(&self, _options: NotificationOptions) {}

    fn register_for_remote_notifications(&self) {}

    fn registered_for_remote_notifications(&self) -> bool {
        false
    }

    fn location_manager(
        &self,
        _delegate: Arc<dyn LocationDelegate>,
    ) -> Box<dyn LocationManagerHandle> {
        Box::new(UnsupportedLocationManager)
    }

    fn bundle_identifier(&self) -> Option<String> {
        None
    }

    fn open_url(&self, url: &str) {
        warn!("cannot open {url}: no URL handler on this platform");
    }
}

struct UnsupportedLocationManager;

impl LocationManagerHandle for UnsupportedLocationManager {
    fn request_authorization(&self, level: LocationLevel) {
        warn!("location authorization ({level:?}) requested on an unsupported platform");
    }
}
