//! Auth feature reducer.
//!
//! Applies the result of a settled sign-in/sign-up call to the modal.

use techstore_core::session::{AuthError, Session};

use crate::overlays::Overlay;

/// Handles a settled auth call.
///
/// Success closes the modal; failure keeps it open with the provider's
/// message. Loading clears on both arms. The current-user slot is not touched
/// here: it updates through the session-change subscription.
pub fn handle_auth_completed(overlay: &mut Option<Overlay>, result: Result<Session, AuthError>) {
    match result {
        Ok(_) => {
            if matches!(overlay, Some(Overlay::Auth(_))) {
                *overlay = None;
            }
        }
        Err(e) => {
            if let Some(Overlay::Auth(modal)) = overlay {
                modal.loading = false;
                modal.error = Some(e.to_string());
            } else {
                // The user dismissed the modal while the call was in flight.
                tracing::debug!(error = %e, "Auth call failed after modal was dismissed");
            }
        }
    }
}
