//! The unified four-state authorization model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The current status of a permission, normalized across every OS subsystem.
///
/// Serialized as its raw identifier (`"authorized"`, `"denied"`,
/// `"notDetermined"`, `"restricted"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionStatus {
    /// Permission has been granted by the user.
    Authorized,
    /// Permission has been denied by the user, or granted at a level too low
    /// for the requested kind.
    Denied,
    /// Permission has not been requested yet.
    NotDetermined,
    /// Permission cannot be granted and re-asking will not help
    /// (e.g., parental controls, services disabled, OS failure).
    Restricted,
}

impl PermissionStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Authorized,
        Self::Denied,
        Self::NotDetermined,
        Self::Restricted,
    ];

    /// Human-readable description of the status.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Authorized => "User has authorized the permission request",
            Self::Denied => "User has denied the permission request",
            Self::NotDetermined => "Permission status is not determined",
            Self::Restricted => "Permission is restricted by OS",
        }
    }

    /// Raw identifier used when persisting the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Denied => "denied",
            Self::NotDetermined => "notDetermined",
            Self::Restricted => "restricted",
        }
    }

    /// Builds a status from a granted/not-granted answer.
    #[must_use]
    pub const fn from_granted(granted: bool) -> Self {
        if granted { Self::Authorized } else { Self::Denied }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Error returned when a raw status identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized permission status: {0:?}")]
pub struct ParseStatusError(pub String);

impl FromStr for PermissionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_are_distinct() {
        let seen: std::collections::HashSet<_> =
            PermissionStatus::ALL.iter().map(|s| s.describe()).collect();
        assert_eq!(seen.len(), 4);
        assert_eq!(
            PermissionStatus::Restricted.to_string(),
            "Permission is restricted by OS"
        );
    }

    #[test]
    fn raw_identifiers_parse_back() {
        for status in PermissionStatus::ALL {
            assert_eq!(status.as_str().parse::<PermissionStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert_eq!(
            "Authorized".parse::<PermissionStatus>(),
            Err(ParseStatusError("Authorized".into()))
        );
        assert!("".parse::<PermissionStatus>().is_err());
    }

    #[test]
    fn serde_uses_raw_identifier() {
        let json = serde_json::to_string(&PermissionStatus::NotDetermined).unwrap();
        assert_eq!(json, "\"notDetermined\"");
        let back: PermissionStatus = serde_json::from_str("\"restricted\"").unwrap();
        assert_eq!(back, PermissionStatus::Restricted);
    }

    #[test]
    fn granted_flag_maps_to_authorized_or_denied() {
        assert_eq!(PermissionStatus::from_granted(true), PermissionStatus::Authorized);
        assert_eq!(PermissionStatus::from_granted(false), PermissionStatus::Denied);
    }
}
