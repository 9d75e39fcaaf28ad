//! Delegate bridge for the two location kinds.
//!
//! The location service never answers a prompt directly. It calls its
//! delegate once the user decides, so the request's completion waits in a
//! single slot until then:
//!
//! ```text
//! Idle --request--> AwaitingAuthorization --authorization_changed--> Idle
//! ```
//!
//! A second request while awaiting replaces the pending completion. The
//! displaced completion is dropped without ever being called.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use log::{debug, warn};

use crate::backend::{LocationDelegate, LocationManagerHandle, PermissionBackend};
use crate::native::{LocationAuthorization, LocationLevel};
use crate::provider::{current_status, map_location};
use crate::request::Completion;
use crate::{PermissionKind, PermissionStatus};

/// Observable state of a location bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// No request is pending.
    Idle,
    /// A prompt was sent and its completion is waiting for the delegate.
    AwaitingAuthorization,
}

struct LocationBridge {
    level: LocationLevel,
    pending: Mutex<Option<Completion>>,
}

impl LocationBridge {
    fn slot(&self) -> MutexGuard<'_, Option<Completion>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocationDelegate for LocationBridge {
    fn authorization_changed(&self, status: LocationAuthorization) {
        // The OS echoes the undetermined state when a manager is created; that is not an answer.
        if status == LocationAuthorization::NotDetermined {
            debug!("location authorization still undetermined ({:?})", self.level);
            return;
        }

        let completion = self.slot().take();
        match completion {
            Some(completion) => {
                let mapped = map_location(self.level, status);
                debug!("location {:?} resolved as {mapped:?} from {status:?}", self.level);
                completion(Some(mapped));
            }
            None => debug!("location authorization changed to {status:?} with no pending request"),
        }
    }
}

/// Long-lived state of one location kind: a lazily created location manager
/// and the pending completion slot.
pub struct LocationPermission {
    kind: PermissionKind,
    backend: Arc<dyn PermissionBackend>,
    bridge: Arc<LocationBridge>,
    manager: OnceLock<Box<dyn LocationManagerHandle>>,
}

impl fmt::Debug for LocationPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationPermission")
            .field("kind", &self.kind)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl LocationPermission {
    /// Creates the state for `level`. No OS object is created until the first request.
    #[must_use]
    pub fn new(backend: Arc<dyn PermissionBackend>, level: LocationLevel) -> Self {
        let kind = match level {
            LocationLevel::Always => PermissionKind::LocationAlways,
            LocationLevel::WhenInUse => PermissionKind::LocationWhileUsing,
        };
        Self {
            kind,
            backend,
            bridge: Arc::new(LocationBridge {
                level,
                pending: Mutex::new(None),
            }),
            manager: OnceLock::new(),
        }
    }

    /// The kind this instance serves.
    #[must_use]
    pub const fn kind(&self) -> PermissionKind {
        self.kind
    }

    /// Current state of the delegate bridge.
    #[must_use]
    pub fn state(&self) -> BridgeState {
        if self.bridge.slot().is_some() {
            BridgeState::AwaitingAuthorization
        } else {
            BridgeState::Idle
        }
    }

    /// Current status of this location kind.
    #[must_use]
    pub fn status(&self) -> PermissionStatus {
        current_status(self.backend.as_ref(), self.kind)
    }

    /// Stores `completion` and sends the prompt. Resolution happens in the delegate.
    ///
    /// An already determined status resolves at once; the OS would not prompt
    /// again and the delegate would never fire.
    pub fn request(&self, completion: Completion) {
        let status = self.status();
        if status != PermissionStatus::NotDetermined {
            debug!("{} already {status:?}, not prompting", self.kind);
            completion(Some(status));
            return;
        }

        let displaced = self.bridge.slot().replace(completion);
        if displaced.is_some() {
            warn!(
                "{} request displaced a pending one; the earlier caller will not be answered",
                self.kind
            );
        }
        drop(displaced);

        debug!("prompting for {}", self.kind);
        self.manager().request_authorization(self.bridge.level);
    }

    fn manager(&self) -> &dyn LocationManagerHandle {
        self.manager
            .get_or_init(|| {
                let delegate: Arc<dyn LocationDelegate> = self.bridge.clone();
                self.backend.location_manager(delegate)
            })
            .as_ref()
    }
}
