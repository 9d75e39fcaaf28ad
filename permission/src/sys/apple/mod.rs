//! Apple platform (iOS/macOS) backend using swift-bridge.
//!
//! Swift answers asynchronous prompts by calling back into opaque relay
//! types it receives from Rust. Raw status codes cross the bridge as `i64`
//! and are decoded by the [`crate::native`] types.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::{
    GrantReply, LocationDelegate, LocationManagerHandle, PermissionBackend, PhotoReply,
};
use crate::native::{
    AccessRequest, AuthorizationStatus, LocationAuthorization, LocationLevel, NativeError,
    NotificationOptions, OsVersion, RecordPermission, Subsystem,
};

#[swift_bridge::bridge]
mod ffi {
    enum NativeSubsystem {
        Bluetooth,
        Camera,
        Contacts,
        AddressBook,
        Events,
        Reminders,
        Photos,
    }

    enum NativeAccess {
        Camera,
        Microphone,
        Contacts,
        AddressBook,
        Events,
        Reminders,
        Notifications,
    }

    extern "Rust" {
        type GrantRelay;
        fn grant_resolved(self: &GrantRelay, granted: bool);
        fn grant_failed(self: &GrantRelay, code: i64, message: String);

        type PhotoRelay;
        fn photo_resolved(self: &PhotoRelay, raw_status: i64);

        type DelegateRelay;
        fn authorization_changed(self: &DelegateRelay, raw_status: i64);
    }

    extern "Swift" {
        fn authorization_status(subsystem: NativeSubsystem) -> i64;
        fn location_services_enabled() -> bool;
        fn location_authorization_status() -> i64;
        fn record_permission() -> i64;
        fn os_version_major() -> u32;
        fn os_version_minor() -> u32;

        fn request_access(
            access: NativeAccess,
            alert: bool,
            badge: bool,
            sound: bool,
            relay: GrantRelay,
        );
        fn request_photo_authorization(relay: PhotoRelay);
        fn register_notification_settings(alert: bool, badge: bool, sound: bool);
        fn register_for_remote_notifications();
        fn is_registered_for_remote_notifications() -> bool;

        fn bundle_identifier() -> Option<String>;
        fn open_url(url: String);

        type AppleLocationManager;

        #[swift_bridge(init)]
        fn new(relay: DelegateRelay) -> AppleLocationManager;

        fn request_always_authorization(self: &AppleLocationManager);
        fn request_when_in_use_authorization(self: &AppleLocationManager);
    }
}

/// Carries a grant reply to Swift; the first answer wins.
pub struct GrantRelay {
    reply: Mutex<Option<GrantReply>>,
}

impl GrantRelay {
    fn new(reply: GrantReply) -> Self {
        Self {
            reply: Mutex::new(Some(reply)),
        }
    }

    fn resolve(&self, answer: Result<bool, NativeError>) {
        let reply = self
            .reply
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(reply) = reply {
            reply(answer);
        }
    }

    fn grant_resolved(&self, granted: bool) {
        self.resolve(Ok(granted));
    }

    fn grant_failed(&self, code: i64, message: String) {
        self.resolve(Err(NativeError::new(code, message)));
    }
}

/// Carries a photo-library reply to Swift.
pub struct PhotoRelay {
    reply: Mutex<Option<PhotoReply>>,
}

impl PhotoRelay {
    fn photo_resolved(&self, raw_status: i64) {
        let reply = self
            .reply
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(reply) = reply {
            reply(AuthorizationStatus::from_raw(raw_status));
        }
    }
}

/// Forwards `CLLocationManagerDelegate` authorization changes to Rust.
pub struct DelegateRelay {
    delegate: Arc<dyn LocationDelegate>,
}

impl DelegateRelay {
    fn authorization_changed(&self, raw_status: i64) {
        self.delegate
            .authorization_changed(LocationAuthorization::from_raw(raw_status));
    }
}

/// Backend implementation backed by the Apple privacy frameworks.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppleBackend;

const fn subsystem_to_ffi(subsystem: Subsystem) -> ffi::NativeSubsystem {
    match subsystem {
        Subsystem::Bluetooth => ffi::NativeSubsystem::Bluetooth,
        Subsystem::Camera => ffi::NativeSubsystem::Camera,
        Subsystem::Contacts => ffi::NativeSubsystem::Contacts,
        Subsystem::AddressBook => ffi::NativeSubsystem::AddressBook,
        Subsystem::Events => ffi::NativeSubsystem::Events,
        Subsystem::Reminders => ffi::NativeSubsystem::Reminders,
        Subsystem::Photos => ffi::NativeSubsystem::Photos,
    }
}

const fn access_to_ffi(request: AccessRequest) -> (ffi::NativeAccess, NotificationOptions) {
    match request {
        AccessRequest::Camera => (ffi::NativeAccess::Camera, NotificationOptions::NONE),
        AccessRequest::Microphone => (ffi::NativeAccess::Microphone, NotificationOptions::NONE),
        AccessRequest::Contacts => (ffi::NativeAccess::Contacts, NotificationOptions::NONE),
        AccessRequest::AddressBook => (ffi::NativeAccess::AddressBook, NotificationOptions::NONE),
        AccessRequest::Events => (ffi::NativeAccess::Events, NotificationOptions::NONE),
        AccessRequest::Reminders => (ffi::NativeAccess::Reminders, NotificationOptions::NONE),
        AccessRequest::Notifications(options) => (ffi::NativeAccess::Notifications, options),
    }
}

impl PermissionBackend for AppleBackend {
    fn authorization_status(&self, subsystem: Subsystem) -> AuthorizationStatus {
        AuthorizationStatus::from_raw(ffi::authorization_status(subsystem_to_ffi(subsystem)))
    }

    fn location_services_enabled(&self) -> bool {
        ffi::location_services_enabled()
    }

    fn location_authorization(&self) -> LocationAuthorization {
        LocationAuthorization::from_raw(ffi::location_authorization_status())
    }

    fn record_permission(&self) -> RecordPermission {
        RecordPermission::from_raw(ffi::record_permission())
    }

    fn os_version(&self) -> OsVersion {
        OsVersion::new(ffi::os_version_major(), ffi::os_version_minor())
    }

    fn request_access(&self, request: AccessRequest, reply: GrantReply) {
        let (access, options) = access_to_ffi(request);
        ffi::request_access(
            access,
            options.alert,
            options.badge,
            options.sound,
            GrantRelay::new(reply),
        );
    }

    fn request_photo_authorization(&self, reply: PhotoReply) {
        ffi::request_photo_authorization(PhotoRelay {
            reply: Mutex::new(Some(reply)),
        });
    }

    fn register_notification_settings(&self, options: NotificationOptions) {
        ffi::register_notification_settings(options.alert, options.badge, options.sound);
    }

    fn register_for_remote_notifications(&self) {
        ffi::register_for_remote_notifications();
    }

    fn registered_for_remote_notifications(&self) -> bool {
        ffi::is_registered_for_remote_notifications()
    }

    fn location_manager(
        &self,
        delegate: Arc<dyn LocationDelegate>,
    ) -> Box<dyn LocationManagerHandle> {
        Box::new(AppleLocationHandle {
            manager: ffi::AppleLocationManager::new(DelegateRelay { delegate }),
        })
    }

    fn bundle_identifier(&self) -> Option<String> {
        ffi::bundle_identifier()
    }

    fn open_url(&self, url: &str) {
        ffi::open_url(url.to_owned());
    }
}

struct AppleLocationHandle {
    manager: ffi::AppleLocationManager,
}

// Safety: the Swift manager is created and used from the main thread only; the
// raw pointer it wraps is owned and synchronized by the Swift side.
#[allow(clippy::non_send_fields_in_send_ty)]
unsafe impl Send for AppleLocationHandle {}
unsafe impl Sync for AppleLocationHandle {}

impl fmt::Debug for AppleLocationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppleLocationHandle").finish_non_exhaustive()
    }
}

impl LocationManagerHandle for AppleLocationHandle {
    fn request_authorization(&self, level: LocationLevel) {
        match level {
            LocationLevel::Always => self.manager.request_always_authorization(),
            LocationLevel::WhenInUse => self.manager.request_when_in_use_authorization(),
        }
    }
}
