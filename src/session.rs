//! # Session State
//!
//! Who is signed in, plus a broadcast of every change.
//!
//! One `SessionState` is owned by [`AppState`](crate::state::AppState) for
//! the lifetime of the application. Nothing is persisted: a restart starts
//! signed out.
//!
//! ## Notifications
//! Every sign-in and sign-out publishes a [`SessionEvent`] synchronously.
//! The payload is the new username, or the empty string after sign-out.
//! Subscribers that fall behind lose the oldest events.

use std::sync::RwLock;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Payload of the session-changed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// New current user, empty after logout
    pub username: String,
}

impl SessionEvent {
    pub fn is_logout(&self) -> bool {
        self.username.is_empty()
    }
}

#[derive(Debug)]
pub struct SessionState {
    current: RwLock<Option<String>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: RwLock::new(None),
            events,
        }
    }

    /// Receive every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn current_user(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some_and(|user| !user.is_empty())
    }

    /// Mark `username` as signed in and notify subscribers.
    pub fn sign_in(&self, username: &str) {
        self.replace(Some(username.to_string()));
    }

    /// Clear the current user and notify subscribers with an empty name.
    pub fn sign_out(&self) {
        self.replace(None);
    }

    /// Store the new user and publish it under the same write lock, so events
    /// arrive in the order the changes were made.
    fn replace(&self, user: Option<String>) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let username = user.clone().unwrap_or_default();
        *current = user;
        // No subscribers is fine
        let _ = self.events.send(SessionEvent { username });
    }
}
