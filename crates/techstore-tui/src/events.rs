//! UI event types.
//!
//! Events are the only inputs to the reducer. Terminal input arrives from the
//! event loop's poll; session changes and auth results arrive through the
//! runtime's inbox channel.

use techstore_core::session::{AuthError, Session};

use crate::overlays::AuthMode;

/// Events processed by the reducer.
#[derive(Debug)]
pub enum UiEvent {
    /// Frame-rate tick; advances animations.
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),
    /// The session changed (restore-on-start result or a live notification).
    /// Atomically replaces the current-user slot with the payload.
    SessionChanged(Option<Session>),
    /// A sign-in or sign-up call settled.
    AuthCompleted {
        mode: AuthMode,
        result: Result<Session, AuthError>,
    },
}
