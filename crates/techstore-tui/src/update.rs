//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects. The reducer performs no I/O.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::auth;
use crate::overlays::{AuthModalState, AuthMode, Overlay, OverlayTransition};
use crate::state::AppState;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::SessionChanged(change) => {
            // Restore-on-start and live notifications both land here; the
            // payload replaces the slot wholesale.
            app.tui.session = change;
            vec![]
        }
        UiEvent::AuthCompleted { result, .. } => {
            auth::handle_auth_completed(&mut app.overlay, result);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    // The active overlay takes over keyboard input.
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        if matches!(update.transition, OverlayTransition::Close) {
            app.overlay = None;
        }
        return update.effects;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') => vec![UiEffect::Quit],
        KeyCode::Char('c') if ctrl => vec![UiEffect::Quit],
        KeyCode::Char('s') => {
            if app.tui.is_signed_in() {
                vec![UiEffect::SpawnSignOut]
            } else {
                app.overlay = Some(Overlay::Auth(AuthModalState::open(AuthMode::Login)));
                vec![]
            }
        }
        KeyCode::Char('u') if !app.tui.is_signed_in() => {
            app.overlay = Some(Overlay::Auth(AuthModalState::open(AuthMode::Signup)));
            vec![]
        }
        KeyCode::Char('m') => {
            app.tui.menu_open = !app.tui.menu_open;
            vec![]
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.tui.catalog.move_up();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.tui.catalog.move_down();
            vec![]
        }
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use techstore_core::config::{AuthConfig, Config};
    use techstore_core::session::{AuthError, Principal, Session};

    use super::*;

    fn configured_app() -> AppState {
        AppState::new(Config {
            auth: AuthConfig {
                url: Some("https://auth.example.test".to_string()),
                anon_key: Some("anon".to_string()),
            },
        })
    }

    fn session(id: &str) -> Session {
        Session {
            access_token: "tok".to_string(),
            principal: Principal {
                id: id.to_string(),
                email: Some(format!("{id}@example.com")),
            },
        }
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut AppState, text: &str) {
        for c in text.chars() {
            update(app, key(KeyCode::Char(c)));
        }
    }

    /// Fills the modal form and submits it.
    fn submit_credentials(app: &mut AppState) -> Vec<UiEffect> {
        type_str(app, "a@b.com");
        update(app, key(KeyCode::Tab));
        type_str(app, "hunter2");
        update(app, key(KeyCode::Enter))
    }

    fn modal(app: &AppState) -> &AuthModalState {
        match &app.overlay {
            Some(Overlay::Auth(modal)) => modal,
            None => panic!("auth modal not open"),
        }
    }

    #[test]
    fn test_session_change_drives_auth_label() {
        let mut app = configured_app();
        assert_eq!(app.tui.auth_action_label(), "Sign In");

        update(&mut app, UiEvent::SessionChanged(Some(session("u1"))));
        assert_eq!(app.tui.auth_action_label(), "Sign Out");

        update(&mut app, UiEvent::SessionChanged(None));
        assert_eq!(app.tui.auth_action_label(), "Sign In");
    }

    #[test]
    fn test_sign_in_key_opens_login_modal_when_signed_out() {
        let mut app = configured_app();
        let effects = update(&mut app, key(KeyCode::Char('s')));
        assert!(effects.is_empty());
        assert_eq!(modal(&app).mode, AuthMode::Login);
    }

    #[test]
    fn test_sign_out_key_emits_fire_and_forget_effect() {
        let mut app = configured_app();
        update(&mut app, UiEvent::SessionChanged(Some(session("u1"))));

        let effects = update(&mut app, key(KeyCode::Char('s')));
        assert_eq!(effects, vec![UiEffect::SpawnSignOut]);
        // The session slot is untouched; the subscription channel clears it.
        assert!(app.tui.is_signed_in());
    }

    #[test]
    fn test_successful_auth_closes_modal_and_clears_loading() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Char('s')));
        let effects = submit_credentials(&mut app);
        assert_eq!(effects.len(), 1);
        assert!(modal(&app).loading);

        update(
            &mut app,
            UiEvent::AuthCompleted {
                mode: AuthMode::Login,
                result: Ok(session("u1")),
            },
        );
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_failed_auth_keeps_modal_open_with_provider_message() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Char('s')));
        submit_credentials(&mut app);

        update(
            &mut app,
            UiEvent::AuthCompleted {
                mode: AuthMode::Login,
                result: Err(AuthError::Service("Invalid login credentials".to_string())),
            },
        );

        let modal = modal(&app);
        assert!(!modal.loading);
        assert_eq!(modal.error.as_deref(), Some("Invalid login credentials"));
        assert_eq!(modal.email, "a@b.com");
    }

    #[test]
    fn test_auth_result_after_dismissal_is_ignored() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Char('s')));
        submit_credentials(&mut app);
        update(&mut app, key(KeyCode::Esc));
        assert!(app.overlay.is_none());

        update(
            &mut app,
            UiEvent::AuthCompleted {
                mode: AuthMode::Login,
                result: Err(AuthError::Service("too late".to_string())),
            },
        );
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_signup_key_opens_signup_modal() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Char('u')));
        assert_eq!(modal(&app).mode, AuthMode::Signup);
    }

    #[test]
    fn test_menu_toggle_is_independent() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Char('m')));
        assert!(app.tui.menu_open);

        update(&mut app, UiEvent::SessionChanged(Some(session("u1"))));
        assert!(app.tui.menu_open);

        update(&mut app, key(KeyCode::Char('m')));
        assert!(!app.tui.menu_open);
    }

    #[test]
    fn test_quit_key_emits_quit() {
        let mut app = configured_app();
        let effects = update(&mut app, key(KeyCode::Char('q')));
        assert_eq!(effects, vec![UiEffect::Quit]);
    }

    #[test]
    fn test_catalog_keys_move_cursor() {
        let mut app = configured_app();
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Down));
        update(&mut app, key(KeyCode::Up));
        assert_eq!(app.tui.catalog.cursor, 1);
    }
}
