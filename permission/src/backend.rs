//! The seam between the unification layer and the operating system.
//!
//! Platform modules under [`crate::sys`] implement [`PermissionBackend`] on top
//! of the native frameworks; [`crate::sim::SimulatedBackend`] implements it in
//! memory.

use std::fmt;
use std::sync::Arc;

use crate::native::{
    AccessRequest, AuthorizationStatus, LocationAuthorization, LocationLevel, NativeError,
    NotificationOptions, OsVersion, RecordPermission, Subsystem,
};

/// Reply of an OS grant API: whether access was granted, or the error it reported.
pub type GrantReply = Box<dyn FnOnce(Result<bool, NativeError>) + Send>;

/// Reply of the photo-library authorization request.
pub type PhotoReply = Box<dyn FnOnce(AuthorizationStatus) + Send>;

/// Receives location authorization changes from the OS.
///
/// The OS calls it once per user decision, and also whenever a location
/// manager is created.
pub trait LocationDelegate: Send + Sync {
    /// The location authorization changed to `status`.
    fn authorization_changed(&self, status: LocationAuthorization);
}

/// A live handle to the OS location-service entry point.
pub trait LocationManagerHandle: Send + Sync {
    /// Asks the OS to prompt for location authorization at `level`.
    ///
    /// Returns immediately; the answer arrives through the delegate the handle
    /// was created with.
    fn request_authorization(&self, level: LocationLevel);
}

/// Native permission APIs of one platform.
pub trait PermissionBackend: Send + Sync + fmt::Debug {
    /// Current authorization of a four-state subsystem.
    fn authorization_status(&self, subsystem: Subsystem) -> AuthorizationStatus;

    /// Whether location services are enabled device-wide.
    fn location_services_enabled(&self) -> bool;

    /// Current location authorization of the app.
    fn location_authorization(&self) -> LocationAuthorization;

    /// Current record permission of the audio session.
    fn record_permission(&self) -> RecordPermission;

    /// Version of the running operating system.
    fn os_version(&self) -> OsVersion;

    /// Prompts through an OS grant API. `reply` runs once, on any thread.
    fn request_access(&self, request: AccessRequest, reply: GrantReply);

    /// Prompts for photo-library access. `reply` runs once, on any thread.
    fn request_photo_authorization(&self, reply: PhotoReply);

    /// Registers legacy notification settings. The OS reports nothing back.
    fn register_notification_settings(&self, options: NotificationOptions);

    /// Registers the app for remote notifications.
    fn register_for_remote_notifications(&self);

    /// Whether the app is currently registered for remote notifications.
    ///
    /// Registration happens regardless of the user's choice, so this is not a
    /// consent signal.
    fn registered_for_remote_notifications(&self) -> bool;

    /// Creates a location manager that reports to `delegate`.
    fn location_manager(&self, delegate: Arc<dyn LocationDelegate>)
    -> Box<dyn LocationManagerHandle>;

    /// Bundle identifier of the running app, if it has one.
    fn bundle_identifier(&self) -> Option<String>;

    /// Opens `url` with the OS URL handler. No completion is reported.
    fn open_url(&self, url: &str);
}
