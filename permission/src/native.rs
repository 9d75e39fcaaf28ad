//! Typed renditions of the native authorization values handed back by the OS.
//!
//! Raw codes follow the Apple frameworks' own numbering. Values the crate does
//! not know about are kept as `Unknown` so they can fail closed instead of
//! being guessed.

/// Four-state authorization value shared by most OS subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    NotDetermined,
    /// The app may not use the capability and the user cannot change that.
    Restricted,
    /// The user refused access.
    Denied,
    /// The user granted access.
    Authorized,
    /// A raw value introduced after this crate was written.
    Unknown(i64),
}

impl AuthorizationStatus {
    /// Decodes a raw OS value.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::Authorized,
            other => Self::Unknown(other),
        }
    }
}

/// Authorization value reported by the location service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationAuthorization {
    /// The user has not been asked yet.
    NotDetermined,
    /// Location use is restricted on this device.
    Restricted,
    /// The user refused location access.
    Denied,
    /// Location access granted at all times.
    AuthorizedAlways,
    /// Location access granted only while the app is in use.
    AuthorizedWhenInUse,
    /// A raw value introduced after this crate was written.
    Unknown(i64),
}

impl LocationAuthorization {
    /// Decodes a raw OS value.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::NotDetermined,
            1 => Self::Restricted,
            2 => Self::Denied,
            3 => Self::AuthorizedAlways,
            4 => Self::AuthorizedWhenInUse,
            other => Self::Unknown(other),
        }
    }
}

/// Record permission of the audio session. It has no restricted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordPermission {
    /// The user has not been asked yet.
    Undetermined,
    /// The user refused microphone access.
    Denied,
    /// The user granted microphone access.
    Granted,
    /// A raw value introduced after this crate was written.
    Unknown(i64),
}

impl RecordPermission {
    /// Decodes a raw value as sent by the Swift bridge.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        match raw {
            0 => Self::Undetermined,
            1 => Self::Denied,
            2 => Self::Granted,
            other => Self::Unknown(other),
        }
    }
}

/// OS subsystems whose authorization is a plain [`AuthorizationStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subsystem {
    /// Bluetooth peripheral manager.
    Bluetooth,
    /// Video capture device.
    Camera,
    /// Contacts framework.
    Contacts,
    /// Legacy address book, used before the contacts framework existed.
    AddressBook,
    /// Event store, calendar entities.
    Events,
    /// Event store, reminder entities.
    Reminders,
    /// Photo library.
    Photos,
}

/// Alert styles a notification authorization request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NotificationOptions {
    /// Show alerts.
    pub alert: bool,
    /// Badge the app icon.
    pub badge: bool,
    /// Play sounds.
    pub sound: bool,
}

impl NotificationOptions {
    /// Nothing.
    pub const NONE: Self = Self {
        alert: false,
        badge: false,
        sound: false,
    };

    /// Alert, badge and sound.
    pub const ALL: Self = Self {
        alert: true,
        badge: true,
        sound: true,
    };
}

/// OS entry points that prompt the user and answer with granted or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessRequest {
    /// Video capture access.
    Camera,
    /// Audio session record permission.
    Microphone,
    /// Contacts framework access.
    Contacts,
    /// Legacy address book access.
    AddressBook,
    /// Event store access for events.
    Events,
    /// Event store access for reminders.
    Reminders,
    /// User-notification center authorization.
    Notifications(NotificationOptions),
}

/// Which location authorization level a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationLevel {
    /// Authorization at all times.
    Always,
    /// Authorization while the app is in use.
    WhenInUse,
}

/// Version of the running operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OsVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
}

impl OsVersion {
    /// First version shipping the contacts framework.
    pub const CONTACTS_FRAMEWORK: Self = Self::new(9, 0);
    /// First version shipping the user-notifications framework.
    pub const USER_NOTIFICATIONS: Self = Self::new(10, 0);

    /// Creates a version.
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether this version is `other` or newer.
    #[must_use]
    pub fn at_least(self, other: Self) -> bool {
        self >= other
    }
}

/// Error reported by an OS grant API alongside its answer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("native error {code}: {message}")]
pub struct NativeError {
    /// Domain-specific error code.
    pub code: i64,
    /// Localized description.
    pub message: String,
}

impl NativeError {
    /// Creates an error.
    #[must_use]
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_decode() {
        assert_eq!(AuthorizationStatus::from_raw(3), AuthorizationStatus::Authorized);
        assert_eq!(AuthorizationStatus::from_raw(4), AuthorizationStatus::Unknown(4));
        assert_eq!(
            LocationAuthorization::from_raw(4),
            LocationAuthorization::AuthorizedWhenInUse
        );
        assert_eq!(LocationAuthorization::from_raw(-1), LocationAuthorization::Unknown(-1));
        assert_eq!(RecordPermission::from_raw(2), RecordPermission::Granted);
    }

    #[test]
    fn version_gates() {
        assert!(OsVersion::new(9, 0).at_least(OsVersion::CONTACTS_FRAMEWORK));
        assert!(!OsVersion::new(8, 4).at_least(OsVersion::CONTACTS_FRAMEWORK));
        assert!(OsVersion::new(10, 3).at_least(OsVersion::USER_NOTIFICATIONS));
        assert!(!OsVersion::new(9, 3).at_least(OsVersion::USER_NOTIFICATIONS));
    }
}
