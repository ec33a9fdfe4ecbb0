//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The runtime uses an "inbox" pattern for async event collection:
//! - Handlers send `UiEvent`s directly to `inbox_tx`
//! - Runtime drains `inbox_rx` each frame to collect results
//! - Session-change notifications arrive via their own watcher and are
//!   translated into `UiEvent::SessionChanged` during collection

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use techstore_core::config::Config;
use techstore_core::session::{SessionClient, SessionWatcher};
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::Overlay;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while the auth spinner is animating (~60fps).
pub const FRAME_DURATION: std::time::Duration = std::time::Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage when nothing
/// is happening.
pub const IDLE_POLL_DURATION: std::time::Duration = std::time::Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal, state, and the session-change watcher. Terminal state
/// is restored on drop or panic; dropping the runtime also releases the
/// session subscription.
pub struct TuiRuntime<C>
where
    C: SessionClient + Send + Sync + 'static,
{
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<C>,
    watcher: SessionWatcher,
    /// Inbox sender - handlers send events here.
    inbox_tx: UiEventSender,
    /// Inbox receiver - runtime drains this each frame.
    inbox_rx: UiEventReceiver,
    last_tick: std::time::Instant,
    /// Last time a terminal event was received (for fast tick during
    /// interaction).
    last_terminal_event: std::time::Instant,
}

impl<C> TuiRuntime<C>
where
    C: SessionClient + Send + Sync + 'static,
{
    /// Creates a new TUI runtime and kicks off session restore.
    ///
    /// Must be called within a tokio runtime context.
    pub fn new(config: Config, client: Arc<C>) -> Result<Self> {
        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config);
        let watcher = client.subscribe();

        // Create inbox channel for async event collection
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = std::time::Instant::now();
        let runtime = Self {
            terminal,
            state,
            client,
            watcher,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        };

        // Restore any persisted session without blocking the first frame.
        let client = Arc::clone(&runtime.client);
        runtime.spawn_effect(None, move || handlers::restore_session(client));

        Ok(runtime)
    }

    /// Runs the main event loop.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true; // Start dirty to ensure initial render

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                // Track terminal activity for fast tick mode
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = std::time::Instant::now();
                }

                // Only Tick triggers render - this caps frame rate at tick
                // cadence. Other events update state but batch renders.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    /// Collects events from all sources (session watcher, inbox, terminal).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Fast polling only while the spinner animates or the user is
        // actively typing; otherwise slow polling to save CPU.
        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.auth_in_flight() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Session-change notifications from the client's channel.
        while let Some(change) = self.watcher.try_next() {
            events.push(UiEvent::SessionChanged(change));
        }

        // Drain inbox - async handler results arrive here
        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Poll terminal events:
        // - If we already have events to process, do non-blocking poll
        // - Otherwise, block until the next tick is due
        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            std::time::Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while event::poll(std::time::Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = std::time::Instant::now();
        }

        Ok(events)
    }

    fn auth_in_flight(&self) -> bool {
        matches!(&self.state.overlay, Some(Overlay::Auth(modal)) if modal.loading)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async effect, sending an optional "started" event
    /// immediately and the result event when complete.
    ///
    /// Handlers become pure async functions that return `UiEvent`; the
    /// runtime handles spawning.
    fn spawn_effect<F, Fut>(&self, started: Option<UiEvent>, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        if let Some(ev) = started {
            let _ = tx.send(ev);
        }
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::SpawnAuth {
                mode,
                email,
                password,
            } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(None, move || {
                    handlers::auth_submit(client, mode, email, password)
                });
            }
            UiEffect::SpawnSignOut => {
                // Fire-and-forget: local state is cleared through the
                // subscription channel, not a completion event.
                let client = Arc::clone(&self.client);
                tokio::spawn(handlers::sign_out(client));
            }
        }
    }
}

impl<C> Drop for TuiRuntime<C>
where
    C: SessionClient + Send + Sync + 'static,
{
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
