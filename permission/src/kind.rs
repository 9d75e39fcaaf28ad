//! The closed catalog of permission kinds.

use std::fmt;

/// Types of permissions that can be queried or requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    /// Bluetooth peripheral access.
    Bluetooth,
    /// Access to the device camera.
    Camera,
    /// Access to contacts.
    Contacts,
    /// Access to calendar events.
    Events,
    /// Location access at all times, including in the background.
    LocationAlways,
    /// Location access while the app is in use.
    LocationWhileUsing,
    /// Access to the device microphone.
    Microphone,
    /// Motion and fitness activity.
    Motion,
    /// User-facing notifications.
    Notifications,
    /// Access to the photo library.
    Photos,
    /// Access to reminders.
    Reminders,
}

impl PermissionKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Bluetooth,
        Self::Camera,
        Self::Contacts,
        Self::Events,
        Self::LocationAlways,
        Self::LocationWhileUsing,
        Self::Microphone,
        Self::Motion,
        Self::Notifications,
        Self::Photos,
        Self::Reminders,
    ];

    /// Display name of the kind.
    ///
    /// Used for cache keys and diagnostics only; dispatch never looks at it.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Bluetooth => "Bluetooth",
            Self::Camera => "Camera",
            Self::Contacts => "Contacts",
            Self::Events => "Events",
            Self::LocationAlways => "Location Always",
            Self::LocationWhileUsing => "Location While Using",
            Self::Microphone => "Microphone",
            Self::Motion => "Core Motion",
            Self::Notifications => "Notification",
            Self::Photos => "Photos",
            Self::Reminders => "Reminders",
        }
    }

    /// Whether this kind resolves requests through the location delegate bridge.
    #[must_use]
    pub const fn is_location(self) -> bool {
        matches!(self, Self::LocationAlways | Self::LocationWhileUsing)
    }
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
