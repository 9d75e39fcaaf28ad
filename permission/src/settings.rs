//! Deep link into the OS settings app.

use thiserror::Error;

/// Scheme of the app's own page in the settings app.
pub const SETTINGS_URL_PREFIX: &str = "app-settings:";

/// Why a settings deep link could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The running app has no bundle identifier.
    #[error("couldn't get bundle identifier")]
    MissingBundleIdentifier,
    /// The bundle identifier cannot be part of a URL.
    #[error("couldn't build settings URL for bundle identifier {0:?}")]
    InvalidUrl(String),
}

/// Builds the settings URL scoped to `bundle_identifier`.
///
/// # Errors
/// Returns [`SettingsError`] if the identifier is absent, empty, or contains
/// characters other than ASCII alphanumerics, `-` and `.`.
pub fn settings_url(bundle_identifier: Option<&str>) -> Result<String, SettingsError> {
    let identifier = bundle_identifier.ok_or(SettingsError::MissingBundleIdentifier)?;
    let valid = !identifier.is_empty()
        && identifier
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if !valid {
        return Err(SettingsError::InvalidUrl(identifier.to_owned()));
    }
    Ok(format!("{SETTINGS_URL_PREFIX}{identifier}"))
}
