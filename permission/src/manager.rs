//! The facade: one entry point routing each kind to its provider or handler.

use std::fmt;
use std::sync::Arc;

use futures::channel::oneshot;
use log::{debug, warn};

use crate::backend::PermissionBackend;
use crate::location::LocationPermission;
use crate::native::{AccessRequest, LocationLevel};
use crate::provider::current_status;
use crate::request::{self, Completion};
use crate::settings::settings_url;
use crate::{PermissionKind, PermissionStatus};

/// Reports and requests OS privacy permissions through one uniform status.
///
/// Construct one per process and pass it around; the two location kinds keep
/// their pending request inside it between the prompt and the user's answer.
pub struct PermissionManager {
    backend: Arc<dyn PermissionBackend>,
    location_always: LocationPermission,
    location_while_using: LocationPermission,
}

impl fmt::Debug for PermissionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionManager")
            .field("backend", &self.backend)
            .field("location_always", &self.location_always)
            .field("location_while_using", &self.location_while_using)
            .finish()
    }
}

impl PermissionManager {
    /// Creates a manager over `backend`.
    #[must_use]
    pub fn new(backend: Arc<dyn PermissionBackend>) -> Self {
        Self {
            location_always: LocationPermission::new(Arc::clone(&backend), LocationLevel::Always),
            location_while_using: LocationPermission::new(
                Arc::clone(&backend),
                LocationLevel::WhenInUse,
            ),
            backend,
        }
    }

    /// Creates a manager over the native backend of the current platform.
    #[must_use]
    pub fn native() -> Self {
        Self::new(crate::sys::native_backend())
    }

    /// The backend this manager talks to.
    #[must_use]
    pub const fn backend(&self) -> &Arc<dyn PermissionBackend> {
        &self.backend
    }

    /// The long-lived state of a location kind.
    #[must_use]
    pub const fn location(&self, level: LocationLevel) -> &LocationPermission {
        match level {
            LocationLevel::Always => &self.location_always,
            LocationLevel::WhenInUse => &self.location_while_using,
        }
    }

    /// Current status of `kind`. Never prompts.
    #[must_use]
    pub fn permission_status(&self, kind: PermissionKind) -> PermissionStatus {
        match kind {
            PermissionKind::LocationAlways => self.location_always.status(),
            PermissionKind::LocationWhileUsing => self.location_while_using.status(),
            _ => current_status(self.backend.as_ref(), kind),
        }
    }

    /// Whether the app is registered for remote notifications.
    ///
    /// Every notifications request registers the app whatever the user
    /// answered, so this tells whether a request has run, not whether alerts
    /// are allowed. [`permission_status`](Self::permission_status) keeps
    /// reporting notifications as undetermined so they stay requestable.
    #[must_use]
    pub fn is_registered_for_remote_notifications(&self) -> bool {
        self.backend.registered_for_remote_notifications()
    }

    /// Requests `kind`, prompting the user only if the status is undetermined.
    ///
    /// `completion` runs exactly once, possibly on another thread, unless a
    /// later request for the same location kind displaces it before the user
    /// answers. It receives `None` only when the OS gives no signal about the
    /// outcome (notifications on systems without the user-notifications
    /// framework).
    pub fn request_permission<F>(&self, kind: PermissionKind, completion: F)
    where
        F: FnOnce(Option<PermissionStatus>) + Send + 'static,
    {
        self.dispatch_request(kind, Box::new(completion));
    }

    /// Async form of [`request_permission`](Self::request_permission).
    ///
    /// Resolves `None` if the OS gives no signal, or if the request is
    /// displaced by a newer one for the same location kind.
    pub async fn request(&self, kind: PermissionKind) -> Option<PermissionStatus> {
        let (sender, receiver) = oneshot::channel();
        self.request_permission(kind, move |status| {
            if sender.send(status).is_err() {
                debug!("{kind} request resolved after its caller stopped waiting");
            }
        });
        receiver.await.ok().flatten()
    }

    /// Opens this app's page in the settings app.
    ///
    /// Does nothing but log if the app has no usable bundle identifier.
    pub fn open_settings(&self, kind: PermissionKind) {
        match settings_url(self.backend.bundle_identifier().as_deref()) {
            Ok(url) => {
                debug!("opening settings for {kind}: {url}");
                self.backend.open_url(&url);
            }
            Err(err) => warn!("cannot open settings for {kind}: {err}"),
        }
    }

    fn dispatch_request(&self, kind: PermissionKind, completion: Completion) {
        let status = self.permission_status(kind);
        if status != PermissionStatus::NotDetermined {
            debug!("{kind} already {status:?}, not prompting");
            completion(Some(status));
            return;
        }

        let backend = self.backend.as_ref();
        match kind {
            PermissionKind::Bluetooth | PermissionKind::Motion => {
                request::resolve_without_prompt(completion);
            }
            PermissionKind::Camera => {
                request::request_grant(backend, AccessRequest::Camera, completion);
            }
            PermissionKind::Microphone => {
                request::request_grant(backend, AccessRequest::Microphone, completion);
            }
            PermissionKind::Events => {
                request::request_grant(backend, AccessRequest::Events, completion);
            }
            PermissionKind::Reminders => {
                request::request_grant(backend, AccessRequest::Reminders, completion);
            }
            PermissionKind::Contacts => request::request_contacts(&self.backend, completion),
            PermissionKind::Photos => request::request_photos(backend, completion),
            PermissionKind::Notifications => request::request_notifications(backend, completion),
            PermissionKind::LocationAlways => self.location_always.request(completion),
            PermissionKind::LocationWhileUsing => self.location_while_using.request(completion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{NativeCall, SimulatedBackend};

    #[test]
    fn open_settings_uses_bundle_identifier() {
        let sim = Arc::new(SimulatedBackend::new());
        sim.set_bundle_identifier(Some("com.example.maps"));
        let manager = PermissionManager::new(sim.clone());
        manager.open_settings(PermissionKind::LocationAlways);
        assert_eq!(sim.opened_urls(), ["app-settings:com.example.maps"]);
    }

    #[test]
    fn open_settings_without_bundle_is_a_no_op() {
        let sim = Arc::new(SimulatedBackend::new());
        sim.set_bundle_identifier(None);
        let manager = PermissionManager::new(sim.clone());
        manager.open_settings(PermissionKind::Camera);
        assert!(sim.calls().is_empty());
    }

    #[test]
    fn notifications_always_register_for_remote() {
        let sim = Arc::new(SimulatedBackend::new());
        sim.set_auto_reply(Some(Ok(false)));
        let manager = PermissionManager::new(sim.clone());
        let seen = Arc::new(std::sync::Mutex::new(None));
        let sink = Arc::clone(&seen);
        manager.request_permission(PermissionKind::Notifications, move |s| {
            *sink.lock().unwrap() = Some(s);
        });
        assert_eq!(*seen.lock().unwrap(), Some(Some(PermissionStatus::Denied)));
        assert_eq!(
            sim.calls().last(),
            Some(&NativeCall::RemoteNotifications)
        );
    }

    #[test]
    fn remote_registration_is_reported_without_changing_status() {
        let sim = Arc::new(SimulatedBackend::new());
        sim.set_auto_reply(Some(Ok(true)));
        let manager = PermissionManager::new(sim.clone());
        assert!(!manager.is_registered_for_remote_notifications());

        manager.request_permission(PermissionKind::Notifications, |_| {});
        assert!(manager.is_registered_for_remote_notifications());
        assert_eq!(
            manager.permission_status(PermissionKind::Notifications),
            PermissionStatus::NotDetermined
        );
    }
}
