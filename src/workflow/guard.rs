use crate::api::AdminApi;
use crate::models::AdminProfile;

use super::notice::Notifications;

#[derive(Debug, Clone, PartialEq)]
pub enum GuardOutcome {
    Proceed(AdminProfile),
    /// Session expired; the redirect is already scheduled.
    RedirectToLogin,
    /// The check failed for another reason; the message is already queued.
    Blocked,
}

/// Pre-flight identity check run before any admin list is loaded.
pub async fn check<A: AdminApi>(api: &A, notes: &mut Notifications) -> GuardOutcome {
    match api.me().await {
        Ok(profile) => GuardOutcome::Proceed(profile),
        Err(e) if e.is_unauthorized() => {
            notes.session_expired();
            GuardOutcome::RedirectToLogin
        }
        Err(e) => {
            log::warn!("identity check failed: {e}");
            notes.report(&e);
            GuardOutcome::Blocked
        }
    }
}
