//! Session client for the external auth service.
//!
//! The application never inspects a session beyond presence/absence, so the
//! signed-in/signed-out distinction is just `Option<Session>`. The client is a
//! trait so the view can be wired to the HTTP implementation or a test double.

mod http;
mod watcher;

pub use http::HttpSessionClient;
use serde::{Deserialize, Serialize};
pub use watcher::{SessionHub, SessionWatcher};

/// The authenticated user record returned by the auth service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Proof of an authenticated principal, owned and validated by the service.
///
/// The access token is opaque to the application; it is only echoed back to
/// the service on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(rename = "user")]
    pub principal: Principal,
}

/// Auth failure taxonomy.
///
/// `NotConfigured` is detected before any request is made; `Service` carries
/// the provider-supplied message verbatim for in-modal display. Neither is
/// fatal and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication is not configured. Check the service URL and key in your config.")]
    NotConfigured,
    #[error("{0}")]
    Service(String),
}

/// Contract with the external auth service.
///
/// `trait_variant` makes the async methods return `Send` futures so the TUI
/// runtime can run them on spawned tasks.
#[trait_variant::make(SessionClient: Send)]
pub trait LocalSessionClient {
    /// One-shot query for any existing session (restore-on-start).
    ///
    /// Absence is the only failure mode the caller has to handle.
    async fn current_session(&self) -> Option<Session>;

    /// Registers a listener for session-change notifications.
    ///
    /// Dropping the returned watcher releases the subscription.
    fn subscribe(&self) -> SessionWatcher;

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Session, AuthError>;

    /// Signs out. The resulting absence-of-session is delivered through the
    /// subscription channel, not the return value.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
