//! Application state composition.
//!
//! State is split between `TuiState` (non-overlay UI state) and
//! `Option<Overlay>` (the active modal, if any). `AppState` combines both so
//! overlay handlers can borrow `&mut self` and `&mut TuiState` without
//! conflicts.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: Option<Session>   (current principal, absent = signed out)
//! │   ├── menu_open: bool            (collapsible nav menu)
//! │   ├── catalog: CatalogState      (product grid cursor)
//! │   └── auth_configured: bool      (cached from config at startup)
//! └── overlay: Option<Overlay>       (auth modal)
//! ```

use techstore_core::config::Config;
use techstore_core::session::Session;

use crate::features::catalog::CatalogState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Current session, kept consistent with the auth service's notion of
    /// validity via the subscription channel. Absent means signed out.
    pub session: Option<Session>,
    /// Collapsible nav menu, independent of all other state.
    pub menu_open: bool,
    /// Product grid cursor/scroll state.
    pub catalog: CatalogState,
    /// Whether the auth service credentials resolved at startup. When false,
    /// submissions fail fast with a configuration message and never emit a
    /// service call.
    pub auth_configured: bool,
    /// Spinner animation frame counter (loading indicator in the auth modal).
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            session: None,
            menu_open: false,
            catalog: CatalogState::new(),
            auth_configured: config.auth.is_configured(),
            spinner_frame: 0,
        }
    }

    /// Returns true when a principal is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    /// Label for the nav bar auth action.
    pub fn auth_action_label(&self) -> &'static str {
        if self.is_signed_in() {
            "Sign Out"
        } else {
            "Sign In"
        }
    }
}
