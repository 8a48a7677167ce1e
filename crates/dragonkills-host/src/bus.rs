//! Event subscriptions and the deferred publish queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use dragonkills_core::event::{EventData, EventPublisher};
use dragonkills_core::module::EventHandler;

/// Events published by handlers, dispatched once the publishing handler
/// has returned.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Mutex<VecDeque<(String, EventData)>>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest pending event.
    pub fn pop(&self) -> Option<(String, EventData)> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}

impl EventPublisher for EventQueue {
    fn publish(&self, event: &str, data: EventData) {
        tracing::debug!(event, "event queued");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back((event.to_owned(), data));
    }
}

struct Subscription {
    event: String,
    library: String,
    handler: Arc<dyn EventHandler>,
}

/// Exact-name subscriptions, kept in subscription order.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl EventBus {
    /// Creates a bus without subscriptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes `handler` to `event` on behalf of `library`.
    pub fn subscribe(&self, event: impl Into<String>, library: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                event: event.into(),
                library: library.into(),
                handler,
            });
    }

    /// Drops every subscription made on behalf of `library`.
    pub fn unsubscribe_library(&self, library: &str) {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|subscription| subscription.library != library);
    }

    /// Returns the handlers subscribed to `event`, in subscription order.
    #[must_use]
    pub fn handlers_for(&self, event: &str) -> Vec<Arc<dyn EventHandler>> {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|subscription| subscription.event == event)
            .map(|subscription| Arc::clone(&subscription.handler))
            .collect()
    }
}
