//! Status providers: current authorization of each kind, without side effects.

use log::warn;

use crate::backend::PermissionBackend;
use crate::native::{
    AuthorizationStatus, LocationAuthorization, LocationLevel, OsVersion, RecordPermission,
    Subsystem,
};
use crate::{PermissionKind, PermissionStatus};

/// Reads the current status of `kind` from the OS.
///
/// Never prompts and never mutates OS state.
pub fn current_status(backend: &dyn PermissionBackend, kind: PermissionKind) -> PermissionStatus {
    match kind {
        PermissionKind::Bluetooth => subsystem_status(backend, Subsystem::Bluetooth),
        PermissionKind::Camera => subsystem_status(backend, Subsystem::Camera),
        PermissionKind::Contacts => {
            if backend.os_version().at_least(OsVersion::CONTACTS_FRAMEWORK) {
                subsystem_status(backend, Subsystem::Contacts)
            } else {
                subsystem_status(backend, Subsystem::AddressBook)
            }
        }
        PermissionKind::Events => subsystem_status(backend, Subsystem::Events),
        PermissionKind::LocationAlways => location_status(backend, LocationLevel::Always),
        PermissionKind::LocationWhileUsing => location_status(backend, LocationLevel::WhenInUse),
        PermissionKind::Microphone => map_record(backend.record_permission()),
        // Querying motion activity starts a live query; there is no passive read.
        // Notifications: the grant API reports the existing decision without re-prompting.
        PermissionKind::Motion | PermissionKind::Notifications => PermissionStatus::NotDetermined,
        PermissionKind::Photos => subsystem_status(backend, Subsystem::Photos),
        PermissionKind::Reminders => subsystem_status(backend, Subsystem::Reminders),
    }
}

fn subsystem_status(backend: &dyn PermissionBackend, subsystem: Subsystem) -> PermissionStatus {
    map_authorization(backend.authorization_status(subsystem))
}

fn location_status(backend: &dyn PermissionBackend, level: LocationLevel) -> PermissionStatus {
    if !backend.location_services_enabled() {
        return PermissionStatus::Restricted;
    }
    map_location(level, backend.location_authorization())
}

/// Maps a native four-state value. Unknown values fail closed.
pub(crate) fn map_authorization(status: AuthorizationStatus) -> PermissionStatus {
    match status {
        AuthorizationStatus::Authorized => PermissionStatus::Authorized,
        AuthorizationStatus::Denied => PermissionStatus::Denied,
        AuthorizationStatus::NotDetermined => PermissionStatus::NotDetermined,
        AuthorizationStatus::Restricted => PermissionStatus::Restricted,
        AuthorizationStatus::Unknown(raw) => {
            warn!("unknown native authorization value {raw}, treating as restricted");
            PermissionStatus::Restricted
        }
    }
}

/// Maps a location authorization for the requested `level`.
///
/// When-in-use authorization is not enough for [`LocationLevel::Always`].
pub(crate) fn map_location(level: LocationLevel, status: LocationAuthorization) -> PermissionStatus {
    match (level, status) {
        (LocationLevel::Always, LocationAuthorization::AuthorizedAlways)
        | (
            LocationLevel::WhenInUse,
            LocationAuthorization::AuthorizedAlways | LocationAuthorization::AuthorizedWhenInUse,
        ) => PermissionStatus::Authorized,
        (LocationLevel::Always, LocationAuthorization::AuthorizedWhenInUse)
        | (_, LocationAuthorization::Denied) => PermissionStatus::Denied,
        (_, LocationAuthorization::NotDetermined) => PermissionStatus::NotDetermined,
        (_, LocationAuthorization::Restricted) => PermissionStatus::Restricted,
        (_, LocationAuthorization::Unknown(raw)) => {
            warn!("unknown native location authorization {raw}, treating as restricted");
            PermissionStatus::Restricted
        }
    }
}

fn map_record(permission: RecordPermission) -> PermissionStatus {
    match permission {
        RecordPermission::Granted => PermissionStatus::Authorized,
        RecordPermission::Denied => PermissionStatus::Denied,
        RecordPermission::Undetermined => PermissionStatus::NotDetermined,
        RecordPermission::Unknown(raw) => {
            warn!("unknown native record permission {raw}, treating as restricted");
            PermissionStatus::Restricted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimulatedBackend;

    #[test]
    fn four_state_kinds_map_one_to_one() {
        let pairs = [
            (PermissionKind::Bluetooth, Subsystem::Bluetooth),
            (PermissionKind::Camera, Subsystem::Camera),
            (PermissionKind::Contacts, Subsystem::Contacts),
            (PermissionKind::Events, Subsystem::Events),
            (PermissionKind::Photos, Subsystem::Photos),
            (PermissionKind::Reminders, Subsystem::Reminders),
        ];
        let native = [
            (AuthorizationStatus::Authorized, PermissionStatus::Authorized),
            (AuthorizationStatus::Denied, PermissionStatus::Denied),
            (AuthorizationStatus::NotDetermined, PermissionStatus::NotDetermined),
            (AuthorizationStatus::Restricted, PermissionStatus::Restricted),
            (AuthorizationStatus::Unknown(7), PermissionStatus::Restricted),
        ];
        let backend = SimulatedBackend::new();
        for (kind, subsystem) in pairs {
            for (value, expected) in native {
                backend.set_authorization(subsystem, value);
                assert_eq!(current_status(&backend, kind), expected, "{kind} {value:?}");
            }
        }
    }

    #[test]
    fn contacts_falls_back_to_address_book_on_old_os() {
        let backend = SimulatedBackend::new();
        backend.set_os_version(OsVersion::new(8, 4));
        backend.set_authorization(Subsystem::Contacts, AuthorizationStatus::Authorized);
        backend.set_authorization(Subsystem::AddressBook, AuthorizationStatus::Denied);
        assert_eq!(
            current_status(&backend, PermissionKind::Contacts),
            PermissionStatus::Denied
        );

        backend.set_os_version(OsVersion::new(9, 0));
        assert_eq!(
            current_status(&backend, PermissionKind::Contacts),
            PermissionStatus::Authorized
        );
    }

    #[test]
    fn location_always_needs_always_authorization() {
        let cases = [
            (LocationAuthorization::AuthorizedAlways, PermissionStatus::Authorized),
            (LocationAuthorization::AuthorizedWhenInUse, PermissionStatus::Denied),
            (LocationAuthorization::Denied, PermissionStatus::Denied),
            (LocationAuthorization::NotDetermined, PermissionStatus::NotDetermined),
            (LocationAuthorization::Restricted, PermissionStatus::Restricted),
            (LocationAuthorization::Unknown(9), PermissionStatus::Restricted),
        ];
        let backend = SimulatedBackend::new();
        for (native, expected) in cases {
            backend.set_location_authorization(native);
            assert_eq!(current_status(&backend, PermissionKind::LocationAlways), expected);
        }
    }

    #[test]
    fn location_while_using_accepts_either_grant() {
        let cases = [
            (LocationAuthorization::AuthorizedAlways, PermissionStatus::Authorized),
            (LocationAuthorization::AuthorizedWhenInUse, PermissionStatus::Authorized),
            (LocationAuthorization::Denied, PermissionStatus::Denied),
            (LocationAuthorization::NotDetermined, PermissionStatus::NotDetermined),
            (LocationAuthorization::Restricted, PermissionStatus::Restricted),
        ];
        let backend = SimulatedBackend::new();
        for (native, expected) in cases {
            backend.set_location_authorization(native);
            assert_eq!(
                current_status(&backend, PermissionKind::LocationWhileUsing),
                expected
            );
        }
    }

    #[test]
    fn disabled_location_services_are_restricted() {
        let backend = SimulatedBackend::new();
        backend.set_location_authorization(LocationAuthorization::AuthorizedAlways);
        backend.set_location_services_enabled(false);
        assert_eq!(
            current_status(&backend, PermissionKind::LocationAlways),
            PermissionStatus::Restricted
        );
        assert_eq!(
            current_status(&backend, PermissionKind::LocationWhileUsing),
            PermissionStatus::Restricted
        );
    }

    #[test]
    fn microphone_has_no_restricted_state() {
        let backend = SimulatedBackend::new();
        backend.set_record_permission(RecordPermission::Granted);
        assert_eq!(
            current_status(&backend, PermissionKind::Microphone),
            PermissionStatus::Authorized
        );
        backend.set_record_permission(RecordPermission::Denied);
        assert_eq!(
            current_status(&backend, PermissionKind::Microphone),
            PermissionStatus::Denied
        );
        backend.set_record_permission(RecordPermission::Undetermined);
        assert_eq!(
            current_status(&backend, PermissionKind::Microphone),
            PermissionStatus::NotDetermined
        );
    }

    #[test]
    fn motion_and_notifications_are_never_determined() {
        let backend = SimulatedBackend::new();
        for value in [AuthorizationStatus::Authorized, AuthorizationStatus::Denied] {
            backend.set_all_authorizations(value);
            assert_eq!(
                current_status(&backend, PermissionKind::Motion),
                PermissionStatus::NotDetermined
            );
            assert_eq!(
                current_status(&backend, PermissionKind::Notifications),
                PermissionStatus::NotDetermined
            );
        }
    }
}
