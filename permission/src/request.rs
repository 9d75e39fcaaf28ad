//! Request handlers for the kinds that answer through a one-shot OS callback.
//!
//! Each handler assumes the caller already checked that the kind is
//! undetermined, and resolves its completion exactly once.

use std::sync::Arc;

use log::debug;

use crate::backend::PermissionBackend;
use crate::native::{AccessRequest, NativeError, NotificationOptions, OsVersion};
use crate::provider::{current_status, map_authorization};
use crate::{PermissionKind, PermissionStatus};

/// Single-use callback carrying the outcome of a permission request.
///
/// `None` means the OS gave no signal about the outcome.
pub type Completion = Box<dyn FnOnce(Option<PermissionStatus>) + Send>;

/// Resolves kinds that have no OS consent step.
pub(crate) fn resolve_without_prompt(completion: Completion) {
    completion(Some(PermissionStatus::NotDetermined));
}

/// Prompts through a grant API; an OS error resolves as restricted.
pub(crate) fn request_grant(
    backend: &dyn PermissionBackend,
    request: AccessRequest,
    completion: Completion,
) {
    debug!("requesting {request:?} access");
    backend.request_access(
        request,
        Box::new(move |reply| completion(Some(grant_or_restricted(reply)))),
    );
}

/// Prompts for contacts access.
///
/// An OS error resolves with whatever the OS now reports, so a real denial is
/// not masked as restricted. The legacy address book only answers yes or no.
pub(crate) fn request_contacts(backend: &Arc<dyn PermissionBackend>, completion: Completion) {
    if backend.os_version().at_least(OsVersion::CONTACTS_FRAMEWORK) {
        let requery = Arc::clone(backend);
        backend.request_access(
            AccessRequest::Contacts,
            Box::new(move |reply| {
                let status = reply.map_or_else(
                    |err| {
                        debug!("contacts request failed ({err}), re-reading status");
                        current_status(requery.as_ref(), PermissionKind::Contacts)
                    },
                    PermissionStatus::from_granted,
                );
                completion(Some(status));
            }),
        );
    } else {
        debug!("requesting legacy address book access");
        backend.request_access(
            AccessRequest::AddressBook,
            Box::new(move |reply| {
                completion(Some(PermissionStatus::from_granted(reply.unwrap_or(false))));
            }),
        );
    }
}

/// Prompts for photo-library access; the answer is already four-state.
pub(crate) fn request_photos(backend: &dyn PermissionBackend, completion: Completion) {
    backend.request_photo_authorization(Box::new(move |status| {
        completion(Some(map_authorization(status)));
    }));
}

/// Prompts for notification authorization and registers for remote notifications.
///
/// Before the user-notifications framework the OS gives no answer at all, so
/// the completion receives `None`.
pub(crate) fn request_notifications(backend: &dyn PermissionBackend, completion: Completion) {
    if backend.os_version().at_least(OsVersion::USER_NOTIFICATIONS) {
        request_grant(
            backend,
            AccessRequest::Notifications(NotificationOptions::ALL),
            completion,
        );
    } else {
        debug!("registering legacy notification settings, outcome unknown");
        backend.register_notification_settings(NotificationOptions::ALL);
        completion(None);
    }
    backend.register_for_remote_notifications();
}

fn grant_or_restricted(reply: Result<bool, NativeError>) -> PermissionStatus {
    reply.map_or(PermissionStatus::Restricted, PermissionStatus::from_granted)
}
