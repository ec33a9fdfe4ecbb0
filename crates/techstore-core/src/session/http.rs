//! HTTP session client against a GoTrue-style auth endpoint set.
//!
//! Endpoints:
//! - `POST {url}/auth/v1/signup`
//! - `POST {url}/auth/v1/token?grant_type=password`
//! - `POST {url}/auth/v1/logout` (bearer token)
//!
//! Successful sign-in/sign-up persists the session to session.json so
//! restore-on-start finds it on the next launch; sign-out deletes it.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use url::Url;

use super::{AuthError, Session, SessionClient, SessionHub, SessionWatcher};
use crate::config::AuthConfig;
use crate::config::paths;

/// Resolved service endpoint. Absent when the config is incomplete.
#[derive(Debug, Clone)]
struct Endpoint {
    base_url: Url,
    anon_key: String,
}

/// Session client backed by the external auth service.
pub struct HttpSessionClient {
    http: reqwest::Client,
    endpoint: Option<Endpoint>,
    hub: SessionHub,
    /// Where the session is persisted across runs.
    session_path: PathBuf,
    /// In-memory session, lazily restored from disk.
    current: Mutex<Option<Session>>,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpSessionClient {
    /// Builds a client from auth config. Missing or malformed credentials
    /// produce a client whose auth calls fail with `NotConfigured` instead of
    /// contacting anything.
    pub fn from_config(auth: &AuthConfig) -> Self {
        let endpoint = match (auth.effective_url(), auth.effective_anon_key()) {
            (Some(url), Some(key)) => match Url::parse(url) {
                Ok(base_url) => Some(Endpoint {
                    base_url,
                    anon_key: key.to_string(),
                }),
                Err(e) => {
                    tracing::error!(url, error = %e, "Invalid auth service URL");
                    None
                }
            },
            _ => None,
        };

        Self {
            http: reqwest::Client::new(),
            endpoint,
            hub: SessionHub::new(),
            session_path: paths::session_path(),
            current: Mutex::new(None),
        }
    }

    /// Overrides the session persistence path (tests use a temp dir).
    #[must_use]
    pub fn with_session_path(mut self, path: PathBuf) -> Self {
        self.session_path = path;
        self
    }

    /// Whether the service credentials resolved at construction.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    fn endpoint(&self) -> Result<&Endpoint, AuthError> {
        self.endpoint.as_ref().ok_or(AuthError::NotConfigured)
    }

    fn auth_url(&self, endpoint: &Endpoint, path: &str) -> Result<Url, AuthError> {
        endpoint
            .base_url
            .join(path)
            .map_err(|e| AuthError::Service(format!("Invalid auth endpoint: {e}")))
    }

    /// Sends credentials to an auth endpoint and parses the session response.
    async fn request_session(
        &self,
        path: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let endpoint = self.endpoint()?;
        let url = self.auth_url(endpoint, path)?;

        let response = self
            .http
            .post(url)
            .header("apikey", &endpoint.anon_key)
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(|e| AuthError::Service(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::Service(service_error_message(response).await));
        }

        let session: Session = response
            .json()
            .await
            .map_err(|e| AuthError::Service(format!("Malformed service response: {e}")))?;

        self.store_session(&session);
        self.hub.publish(Some(session.clone()));
        Ok(session)
    }

    fn store_session(&self, session: &Session) {
        *self.current.lock().expect("session lock poisoned") = Some(session.clone());
        if let Err(e) = persist_session(&self.session_path, session) {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }

    fn clear_session(&self) -> Option<Session> {
        let previous = self.current.lock().expect("session lock poisoned").take();
        if self.session_path.exists()
            && let Err(e) = std::fs::remove_file(&self.session_path)
        {
            tracing::warn!(error = %e, "Failed to remove persisted session");
        }
        previous
    }
}

impl SessionClient for HttpSessionClient {
    async fn current_session(&self) -> Option<Session> {
        {
            let current = self.current.lock().expect("session lock poisoned");
            if current.is_some() {
                return current.clone();
            }
        }

        // Restore from disk; anything unreadable degrades to "no session".
        let restored = load_session(&self.session_path)?;
        let mut current = self.current.lock().expect("session lock poisoned");
        *current = Some(restored.clone());
        Some(restored)
    }

    fn subscribe(&self) -> SessionWatcher {
        self.hub.subscribe()
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.request_session("/auth/v1/signup", email, password)
            .await
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        self.request_session("/auth/v1/token?grant_type=password", email, password)
            .await
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        // Local state clears before anything can fail: the session and its
        // file are gone regardless of what the revocation request does, and
        // watchers hear about it first.
        let Some(session) = self.clear_session() else {
            return Ok(());
        };
        self.hub.publish(None);

        let endpoint = self.endpoint()?;
        let url = self.auth_url(endpoint, "/auth/v1/logout")?;
        let response = self
            .http
            .post(url)
            .header("apikey", &endpoint.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthError::Service(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AuthError::Service(service_error_message(response).await));
        }
        Ok(())
    }
}

/// Extracts the provider's human-readable message from an error response.
///
/// GoTrue variously uses `error_description`, `msg`, `message`, and `error`.
async fn service_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str())
                && !message.is_empty()
            {
                return message.to_string();
            }
        }
    }

    format!("Auth service returned HTTP {status}")
}

fn persist_session(path: &std::path::Path, session: &Session) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn load_session(path: &std::path::Path) -> Option<Session> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable persisted session");
            None
        }
    }
}
