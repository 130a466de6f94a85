//! In-memory event bus implementing the notification sink port.
//!
//! Listeners are stored per query name and run synchronously in
//! registration order. Emission works on a snapshot of the listener list,
//! so a listener may register further listeners without deadlocking; those
//! only see later emissions.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use switchboard_application::{Listener, Notification, NotificationSink};
use tracing::{debug, trace};

/// Registry of listeners organized by event name.
#[derive(Default)]
pub struct EventBus {
    /// event_name → listeners (in registration order)
    listeners: RwLock<HashMap<String, Vec<Listener>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self, event_name: &str) -> Vec<Listener> {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event_name)
            .cloned()
            .unwrap_or_default()
    }
}

impl NotificationSink for EventBus {
    fn on(&self, event: &str, listener: Listener) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push(listener);
        debug!(event, "Registered listener");
    }

    fn emit(&self, event: &str, notification: &Notification) -> usize {
        let listeners = self.snapshot(event);
        if listeners.is_empty() {
            trace!(event, "No listeners registered");
        }
        for listener in &listeners {
            listener(notification);
        }
        listeners.len()
    }

    fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }
}
