//! # Grantkit
//!
//! A unified facade over a mobile operating system's privacy-permission APIs.
//!
//! Every capability (camera, contacts, location, microphone, ...) reports its
//! authorization through its own native enumeration and its own callback
//! shape. Grantkit folds all of them into one four-state
//! [`PermissionStatus`](permission::PermissionStatus) and one completion
//! contract per request.
//!
//! ## Features
//!
//! - `permission` (default): status queries, consent requests, settings deep links.
//! - `store`: last-known-status cache persisted to local key/value storage.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! grantkit = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```rust,ignore
//! use grantkit::permission::{PermissionKind, PermissionManager};
//!
//! async fn ask_for_camera(manager: &PermissionManager) {
//!     if let Some(status) = manager.request(PermissionKind::Camera).await {
//!         println!("Camera: {status}");
//!     }
//! }
//! ```

#[cfg(feature = "permission")]
pub use grantkit_permission as permission;

#[cfg(feature = "store")]
pub use grantkit_store as store;
