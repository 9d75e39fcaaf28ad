//! In-memory backend with scriptable native state.
//!
//! Useful on hosts without a consent model (desktop previews) and in tests.
//! Prompts never show anything: they are recorded, and their replies wait
//! until the owner delivers a decision, unless an automatic answer is set.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::debug;

use crate::backend::{
    GrantReply, LocationDelegate, LocationManagerHandle, PermissionBackend, PhotoReply,
};
use crate::native::{
    AccessRequest, AuthorizationStatus, LocationAuthorization, LocationLevel, NativeError,
    NotificationOptions, OsVersion, RecordPermission, Subsystem,
};

/// A native call recorded by [`SimulatedBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    /// A grant API was invoked.
    Access(AccessRequest),
    /// The photo-library authorization was requested.
    Photos,
    /// A location manager asked for authorization.
    Location(LocationLevel),
    /// Legacy notification settings were registered.
    NotificationSettings(NotificationOptions),
    /// The app registered for remote notifications.
    RemoteNotifications,
    /// A URL was handed to the OS.
    OpenUrl(String),
}

impl NativeCall {
    /// Whether the call would put a consent dialog on screen.
    #[must_use]
    pub const fn is_prompt(&self) -> bool {
        matches!(
            self,
            Self::Access(_) | Self::Photos | Self::Location(_) | Self::NotificationSettings(_)
        )
    }
}

struct SimState {
    authorizations: HashMap<Subsystem, AuthorizationStatus>,
    location_services_enabled: bool,
    location: LocationAuthorization,
    record: RecordPermission,
    os_version: OsVersion,
    bundle_identifier: Option<String>,
    remote_registered: bool,
    calls: Vec<NativeCall>,
    pending_access: Vec<(AccessRequest, GrantReply)>,
    pending_photos: Vec<PhotoReply>,
    delegates: Vec<Weak<dyn LocationDelegate>>,
    auto_reply: Option<Result<bool, NativeError>>,
    auto_location: Option<LocationAuthorization>,
}

impl Default for SimState {
    fn default() -> Self {
        Self {
            authorizations: HashMap::new(),
            location_services_enabled: true,
            location: LocationAuthorization::NotDetermined,
            record: RecordPermission::Undetermined,
            os_version: OsVersion::new(17, 0),
            bundle_identifier: Some("dev.grantkit.simulator".to_owned()),
            remote_registered: false,
            calls: Vec::new(),
            pending_access: Vec::new(),
            pending_photos: Vec::new(),
            delegates: Vec::new(),
            auto_reply: None,
            auto_location: None,
        }
    }
}

impl SimState {
    fn apply_grant(&mut self, request: AccessRequest, granted: bool) {
        let status = if granted {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Denied
        };
        let subsystem = match request {
            AccessRequest::Camera => Subsystem::Camera,
            AccessRequest::Contacts => Subsystem::Contacts,
            AccessRequest::AddressBook => Subsystem::AddressBook,
            AccessRequest::Events => Subsystem::Events,
            AccessRequest::Reminders => Subsystem::Reminders,
            AccessRequest::Microphone => {
                self.record = if granted {
                    RecordPermission::Granted
                } else {
                    RecordPermission::Denied
                };
                return;
            }
            AccessRequest::Notifications(_) => return,
        };
        self.authorizations.insert(subsystem, status);
    }
}

/// A [`PermissionBackend`] whose native state is set by its owner.
///
/// Everything starts undetermined, with location services enabled. Clones
/// share the same state.
#[derive(Clone, Default)]
pub struct SimulatedBackend {
    state: Arc<Mutex<SimState>>,
}

impl fmt::Debug for SimulatedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("SimulatedBackend")
            .field("os_version", &state.os_version)
            .field("calls", &state.calls)
            .field("pending_access", &state.pending_access.len())
            .field("pending_photos", &state.pending_photos.len())
            .finish_non_exhaustive()
    }
}

impl SimulatedBackend {
    /// Creates a backend where every permission is undetermined.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sets the native value of a four-state subsystem.
    pub fn set_authorization(&self, subsystem: Subsystem, status: AuthorizationStatus) {
        self.lock().authorizations.insert(subsystem, status);
    }

    /// Sets every four-state subsystem, the location service, and the microphone
    /// to the equivalent of `status`.
    pub fn set_all_authorizations(&self, status: AuthorizationStatus) {
        let mut state = self.lock();
        for subsystem in [
            Subsystem::Bluetooth,
            Subsystem::Camera,
            Subsystem::Contacts,
            Subsystem::AddressBook,
            Subsystem::Events,
            Subsystem::Reminders,
            Subsystem::Photos,
        ] {
            state.authorizations.insert(subsystem, status);
        }
        state.location = match status {
            AuthorizationStatus::NotDetermined => LocationAuthorization::NotDetermined,
            AuthorizationStatus::Restricted => LocationAuthorization::Restricted,
            AuthorizationStatus::Denied => LocationAuthorization::Denied,
            AuthorizationStatus::Authorized => LocationAuthorization::AuthorizedAlways,
            AuthorizationStatus::Unknown(raw) => LocationAuthorization::Unknown(raw),
        };
        state.record = match status {
            AuthorizationStatus::NotDetermined => RecordPermission::Undetermined,
            AuthorizationStatus::Authorized => RecordPermission::Granted,
            AuthorizationStatus::Denied | AuthorizationStatus::Restricted => {
                RecordPermission::Denied
            }
            AuthorizationStatus::Unknown(raw) => RecordPermission::Unknown(raw),
        };
    }

    /// Enables or disables location services device-wide.
    pub fn set_location_services_enabled(&self, enabled: bool) {
        self.lock().location_services_enabled = enabled;
    }

    /// Sets the app's location authorization without notifying delegates.
    pub fn set_location_authorization(&self, status: LocationAuthorization) {
        self.lock().location = status;
    }

    /// Sets the microphone record permission.
    pub fn set_record_permission(&self, permission: RecordPermission) {
        self.lock().record = permission;
    }

    /// Sets whether the app counts as registered for remote notifications.
    pub fn set_registered_for_remote_notifications(&self, registered: bool) {
        self.lock().remote_registered = registered;
    }

    /// Sets the reported OS version.
    pub fn set_os_version(&self, version: OsVersion) {
        self.lock().os_version = version;
    }

    /// Sets the reported bundle identifier.
    pub fn set_bundle_identifier(&self, identifier: Option<&str>) {
        self.lock().bundle_identifier = identifier.map(str::to_owned);
    }

    /// Answers every future grant request immediately with `reply`.
    pub fn set_auto_reply(&self, reply: Option<Result<bool, NativeError>>) {
        self.lock().auto_reply = reply;
    }

    /// Answers every future location prompt immediately with `status`.
    pub fn set_auto_location(&self, status: Option<LocationAuthorization>) {
        self.lock().auto_location = status;
    }

    /// Native calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<NativeCall> {
        self.lock().calls.clone()
    }

    /// Number of consent dialogs that would have been shown.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_prompt()).count()
    }

    /// URLs handed to the OS.
    #[must_use]
    pub fn opened_urls(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                NativeCall::OpenUrl(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of location managers created.
    #[must_use]
    pub fn location_managers_created(&self) -> usize {
        self.lock().delegates.len()
    }

    /// Delivers the user's answer to the oldest pending grant request of `request`.
    ///
    /// Returns `false` if no such request is pending.
    pub fn reply_access(&self, request: AccessRequest, reply: Result<bool, NativeError>) -> bool {
        let pending = {
            let mut state = self.lock();
            let Some(index) = state.pending_access.iter().position(|(r, _)| *r == request) else {
                return false;
            };
            if let Ok(granted) = &reply {
                state.apply_grant(request, *granted);
            }
            state.pending_access.remove(index).1
        };
        pending(reply);
        true
    }

    /// Delivers the user's answer to the oldest pending photo-library request.
    ///
    /// Returns `false` if none is pending.
    pub fn reply_photos(&self, status: AuthorizationStatus) -> bool {
        let pending = {
            let mut state = self.lock();
            if state.pending_photos.is_empty() {
                return false;
            }
            state.authorizations.insert(Subsystem::Photos, status);
            state.pending_photos.remove(0)
        };
        pending(status);
        true
    }

    /// Changes the location authorization and notifies every live location manager delegate.
    pub fn deliver_location_authorization(&self, status: LocationAuthorization) {
        let delegates: Vec<_> = {
            let mut state = self.lock();
            state.location = status;
            state.delegates.iter().filter_map(Weak::upgrade).collect()
        };
        for delegate in delegates {
            delegate.authorization_changed(status);
        }
    }

    fn record(&self, call: NativeCall) {
        debug!("simulated native call: {call:?}");
        self.lock().calls.push(call);
    }
}

impl PermissionBackend for SimulatedBackend {
    fn authorization_status(&self, subsystem: Subsystem) -> AuthorizationStatus {
        self.lock()
            .authorizations
            .get(&subsystem)
            .copied()
            .unwrap_or(AuthorizationStatus::NotDetermined)
    }

    fn location_services_enabled(&self) -> bool {
        self.lock().location_services_enabled
    }

    fn location_authorization(&self) -> LocationAuthorization {
        self.lock().location
    }

    fn record_permission(&self) -> RecordPermission {
        self.lock().record
    }

    fn os_version(&self) -> OsVersion {
        self.lock().os_version
    }

    fn request_access(&self, request: AccessRequest, reply: GrantReply) {
        self.record(NativeCall::Access(request));
        let auto = self.lock().auto_reply.clone();
        match auto {
            Some(answer) => {
                if let Ok(granted) = &answer {
                    self.lock().apply_grant(request, *granted);
                }
                reply(answer);
            }
            None => self.lock().pending_access.push((request, reply)),
        }
    }

    fn request_photo_authorization(&self, reply: PhotoReply) {
        self.record(NativeCall::Photos);
        self.lock().pending_photos.push(reply);
    }

    fn register_notification_settings(&self, options: NotificationOptions) {
        self.record(NativeCall::NotificationSettings(options));
    }

    fn register_for_remote_notifications(&self) {
        self.record(NativeCall::RemoteNotifications);
        self.lock().remote_registered = true;
    }

    fn registered_for_remote_notifications(&self) -> bool {
        self.lock().remote_registered
    }

    fn location_manager(
        &self,
        delegate: Arc<dyn LocationDelegate>,
    ) -> Box<dyn LocationManagerHandle> {
        self.lock().delegates.push(Arc::downgrade(&delegate));
        Box::new(SimulatedLocationManager {
            backend: self.clone(),
        })
    }

    fn bundle_identifier(&self) -> Option<String> {
        self.lock().bundle_identifier.clone()
    }

    fn open_url(&self, url: &str) {
        self.record(NativeCall::OpenUrl(url.to_owned()));
    }
}

struct SimulatedLocationManager {
    backend: SimulatedBackend,
}

impl LocationManagerHandle for SimulatedLocationManager {
    fn request_authorization(&self, level: LocationLevel) {
        self.backend.record(NativeCall::Location(level));
        let auto = self.backend.lock().auto_location;
        if let Some(status) = auto {
            self.backend.deliver_location_authorization(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_update_native_state() {
        let sim = SimulatedBackend::new();
        sim.request_access(AccessRequest::Microphone, Box::new(|_| {}));
        assert!(sim.reply_access(AccessRequest::Microphone, Ok(true)));
        assert_eq!(sim.record_permission(), RecordPermission::Granted);
        assert!(!sim.reply_access(AccessRequest::Microphone, Ok(true)));
    }

    #[test]
    fn dropped_delegates_are_not_notified() {
        struct Panics;
        impl LocationDelegate for Panics {
            fn authorization_changed(&self, _: LocationAuthorization) {
                panic!("delegate should be gone");
            }
        }

        let sim = SimulatedBackend::new();
        let delegate: Arc<dyn LocationDelegate> = Arc::new(Panics);
        let manager = sim.location_manager(Arc::clone(&delegate));
        drop(delegate);
        drop(manager);
        sim.deliver_location_authorization(LocationAuthorization::Denied);
        assert_eq!(sim.location_authorization(), LocationAuthorization::Denied);
    }
}
