//! Unified privacy-permission status and consent requests.
//!
//! Each OS subsystem reports authorization through its own enumeration and
//! answers prompts through its own callback shape. This crate folds them into
//! one four-state [`PermissionStatus`] and one completion contract per
//! request, behind a single [`PermissionManager`].
//!
//! ```no_run
//! use grantkit_permission::{PermissionKind, PermissionManager, PermissionStatus};
//!
//! let manager = PermissionManager::native();
//! if manager.permission_status(PermissionKind::Camera) == PermissionStatus::NotDetermined {
//!     manager.request_permission(PermissionKind::Camera, |status| {
//!         println!("camera: {status:?}");
//!     });
//! }
//! ```

#![warn(missing_docs)]

pub mod backend;
mod kind;
pub mod location;
mod manager;
pub mod native;
mod provider;
mod request;
pub mod settings;
pub mod sim;
mod status;

/// Platform-specific implementations.
pub mod sys;

pub use kind::PermissionKind;
pub use manager::PermissionManager;
pub use request::Completion;
pub use status::{ParseStatusError, PermissionStatus};
