//! Session-change subscriptions.
//!
//! `SessionHub` is the broadcast side owned by a client; `SessionWatcher` is
//! the scoped listener handed to the view. The watcher releases its
//! registration on drop, so teardown cannot leak a listener.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

use super::Session;

/// Channel capacity for session-change notifications. Changes are rare
/// (sign-in/sign-out), so a small buffer is plenty.
const CHANNEL_CAPACITY: usize = 16;

/// Broadcast side of the session-change channel.
#[derive(Debug)]
pub struct SessionHub {
    tx: broadcast::Sender<Option<Session>>,
    listeners: Arc<AtomicUsize>,
}

impl SessionHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            listeners: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Registers a new watcher.
    pub fn subscribe(&self) -> SessionWatcher {
        self.listeners.fetch_add(1, Ordering::SeqCst);
        SessionWatcher {
            rx: self.tx.subscribe(),
            _guard: SubscriptionGuard {
                listeners: Arc::clone(&self.listeners),
            },
        }
    }

    /// Publishes a session change to all live watchers.
    pub fn publish(&self, change: Option<Session>) {
        // Send fails only when no receiver exists; that's fine.
        let _ = self.tx.send(change);
    }

    /// Number of watchers currently registered.
    pub fn active_listeners(&self) -> usize {
        self.listeners.load(Ordering::SeqCst)
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}

/// A live registration on the session-change channel.
///
/// Each notification carries the full new value (`Some(session)` or `None`),
/// replacing whatever the holder knew before.
#[derive(Debug)]
pub struct SessionWatcher {
    rx: broadcast::Receiver<Option<Session>>,
    _guard: SubscriptionGuard,
}

impl SessionWatcher {
    /// Drains the next pending change, if any. Non-blocking.
    ///
    /// If the watcher fell behind, skips to the newest pending change; only
    /// the latest value matters for presence/absence.
    pub fn try_next(&mut self) -> Option<Option<Session>> {
        loop {
            match self.rx.try_recv() {
                Ok(change) => return Some(change),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }
}

#[derive(Debug)]
struct SubscriptionGuard {
    listeners: Arc<AtomicUsize>,
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.listeners.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Principal;

    fn session(id: &str) -> Session {
        Session {
            access_token: format!("token-{id}"),
            principal: Principal {
                id: id.to_string(),
                email: Some(format!("{id}@example.com")),
            },
        }
    }

    #[test]
    fn test_watcher_receives_changes_in_order() {
        let hub = SessionHub::new();
        let mut watcher = hub.subscribe();

        hub.publish(Some(session("a")));
        hub.publish(None);

        assert_eq!(watcher.try_next(), Some(Some(session("a"))));
        assert_eq!(watcher.try_next(), Some(None));
        assert_eq!(watcher.try_next(), None);
    }

    /// Dropping the watcher releases the registration exactly once.
    #[test]
    fn test_drop_releases_subscription_once() {
        let hub = SessionHub::new();
        assert_eq!(hub.active_listeners(), 0);

        let watcher = hub.subscribe();
        let second = hub.subscribe();
        assert_eq!(hub.active_listeners(), 2);

        drop(watcher);
        assert_eq!(hub.active_listeners(), 1);
        drop(second);
        assert_eq!(hub.active_listeners(), 0);
    }

    /// Events published after drop reach nothing; state held elsewhere can't
    /// be mutated through a released subscription.
    #[test]
    fn test_publish_after_drop_reaches_no_one() {
        let hub = SessionHub::new();
        let watcher = hub.subscribe();
        drop(watcher);

        hub.publish(Some(session("ghost")));
        assert_eq!(hub.active_listeners(), 0);

        // A fresh watcher only sees changes published after it subscribed.
        let mut late = hub.subscribe();
        assert_eq!(late.try_next(), None);
    }

    #[test]
    fn test_lagged_watcher_skips_to_newest() {
        let hub = SessionHub::new();
        let mut watcher = hub.subscribe();

        for i in 0..CHANNEL_CAPACITY + 4 {
            hub.publish(Some(session(&i.to_string())));
        }

        // First drained value is whatever survived the lag, not an error.
        assert!(watcher.try_next().is_some());
    }
}
