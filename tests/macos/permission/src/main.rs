//! Smoke test binary for grantkit-permission.
//!
//! Run with: cargo run -p grantkit-permission-test [kind...]
//!
//! Without arguments every kind is checked; kinds still undetermined are
//! requested, which shows the native prompts on platforms that have them.

use grantkit_permission::{PermissionKind, PermissionManager, PermissionStatus};
use grantkit_store::{StatusStore, StoreConfig};

#[tokio::main]
async fn main() {
    println!("=== Grantkit Permission Test ===\n");

    let manager = PermissionManager::native();
    let config = StoreConfig::for_app(manager.backend().bundle_identifier());
    let mut store = match StatusStore::open(&config) {
        Ok(store) => Some(store),
        Err(e) => {
            println!("Status cache unavailable: {e}\n");
            None
        }
    };

    let filter: Vec<String> = std::env::args().skip(1).collect();
    let kinds = PermissionKind::ALL.into_iter().filter(|kind| {
        filter.is_empty()
            || filter
                .iter()
                .any(|arg| arg.eq_ignore_ascii_case(&kind.describe().replace(' ', "")))
    });

    for kind in kinds {
        let cached = store.as_ref().and_then(|s| s.load(kind));
        let status = manager.permission_status(kind);
        println!("{kind}: {status:?} (last seen: {cached:?})");

        let status = if status == PermissionStatus::NotDetermined {
            println!("  Requesting...");
            match manager.request(kind).await {
                Some(new_status) => {
                    println!("  ✓ {new_status}");
                    new_status
                }
                None => {
                    println!("  ? OS reported no outcome");
                    continue;
                }
            }
        } else {
            status
        };

        if let Some(store) = store.as_mut() {
            if let Err(e) = store.save(kind, status) {
                println!("  ✗ Failed to cache status: {e}");
            }
        }
        if matches!(status, PermissionStatus::Denied) {
            println!("  Opening settings so the user can change their mind");
            manager.open_settings(kind);
        }
    }
}
