//! Effect handler implementations.
//!
//! Handlers are pure async functions that perform I/O against the session
//! client and return the `UiEvent` carrying the result. The runtime spawns
//! them via `spawn_effect`; they never touch state directly.

use std::sync::Arc;

use techstore_core::session::SessionClient;

use crate::events::UiEvent;
use crate::overlays::AuthMode;

/// Runs a sign-in or sign-up call and wraps the outcome for the reducer.
pub async fn auth_submit<C>(client: Arc<C>, mode: AuthMode, email: String, password: String) -> UiEvent
where
    C: SessionClient + Send + Sync + 'static,
{
    let result = match mode {
        AuthMode::Login => client.sign_in_with_password(&email, &password).await,
        AuthMode::Signup => client.sign_up(&email, &password).await,
    };
    if let Err(error) = &result {
        tracing::info!(%error, "auth request failed");
    }
    UiEvent::AuthCompleted { mode, result }
}

/// Revokes the current session. Failures are logged, never surfaced in the
/// UI; the subscription channel already cleared local state.
pub async fn sign_out<C>(client: Arc<C>)
where
    C: SessionClient + Send + Sync + 'static,
{
    if let Err(error) = client.sign_out().await {
        tracing::warn!(%error, "sign-out revocation failed");
    }
}

/// Loads any persisted session at startup.
pub async fn restore_session<C>(client: Arc<C>) -> UiEvent
where
    C: SessionClient + Send + Sync + 'static,
{
    UiEvent::SessionChanged(client.current_session().await)
}
