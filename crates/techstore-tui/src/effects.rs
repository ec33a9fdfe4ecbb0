//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never touches
//! the session client.

use crate::overlays::AuthMode;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Spawn a sign-in or sign-up call with the submitted credentials.
    SpawnAuth {
        mode: AuthMode,
        email: String,
        password: String,
    },
    /// Spawn a sign-out call. Fire-and-forget: failures are logged and the
    /// session slot clears via the subscription channel.
    SpawnSignOut,
}
