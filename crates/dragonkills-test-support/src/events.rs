//! Test publisher: records published events instead of dispatching them.

use std::sync::Mutex;

use dragonkills_core::event::{EventData, EventPublisher};

/// An event publisher that records every published event.
#[derive(Debug, Default)]
pub struct RecordingEventPublisher {
    published: Mutex<Vec<(String, EventData)>>,
}

impl RecordingEventPublisher {
    /// Creates an empty recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<(String, EventData)> {
        self.published.lock().unwrap().clone()
    }

    /// Returns the names of all published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published_names(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl EventPublisher for RecordingEventPublisher {
    fn publish(&self, event: &str, data: EventData) {
        self.published
            .lock()
            .unwrap()
            .push((event.to_owned(), data));
    }
}
