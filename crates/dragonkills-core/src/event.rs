//! Event contexts passed through the engine's event bus.

use uuid::Uuid;

use crate::battle::Battle;
use crate::error::EngineError;
use crate::viewpoint::{Parameters, Viewpoint};

/// Payload of a navigation hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationData {
    /// The viewpoint being rendered.
    pub viewpoint: Viewpoint,
    /// Parameters of the action that led here.
    pub parameters: Parameters,
    /// The scene the character came from, if any.
    pub referrer_scene_id: Option<Uuid>,
}

/// Payload of the battle-over hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleOverData {
    /// Identifies which configured encounter the battle belongs to.
    pub battle_identifier: String,
    /// The finished battle.
    pub battle: Battle,
    /// The viewpoint being rendered.
    pub viewpoint: Viewpoint,
    /// The scene the battle was started from.
    pub referrer_scene_id: Uuid,
}

/// Payload of character-scoped events.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterData {
    /// The character the event is about.
    pub character_id: Uuid,
    /// Optional event-specific value.
    pub value: Option<serde_json::Value>,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// No payload.
    Empty,
    /// A scene is being rendered.
    Navigation(NavigationData),
    /// A battle has ended.
    BattleOver(BattleOverData),
    /// Something happened to a character.
    Character(CharacterData),
}

impl EventData {
    fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Navigation(_) => "navigation",
            Self::BattleOver(_) => "battle over",
            Self::Character(_) => "character",
        }
    }
}

/// An event travelling through the bus, handed from handler to handler.
#[derive(Debug, Clone, PartialEq)]
pub struct EventContext {
    event: String,
    matching_pattern: String,
    data: EventData,
}

impl EventContext {
    /// Creates an event context.
    #[must_use]
    pub fn new(event: impl Into<String>, matching_pattern: impl Into<String>, data: EventData) -> Self {
        Self {
            event: event.into(),
            matching_pattern: matching_pattern.into(),
            data,
        }
    }

    /// Returns the event name.
    #[must_use]
    pub fn event(&self) -> &str {
        &self.event
    }

    /// Returns the subscription pattern that matched this event.
    #[must_use]
    pub fn matching_pattern(&self) -> &str {
        &self.matching_pattern
    }

    /// Returns the payload.
    #[must_use]
    pub fn data(&self) -> &EventData {
        &self.data
    }

    /// Consumes the context, returning the payload.
    #[must_use]
    pub fn into_data(self) -> EventData {
        self.data
    }

    /// Returns the navigation payload, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnexpectedEventData` for any other payload.
    pub fn navigation_mut(&mut self) -> Result<&mut NavigationData, EngineError> {
        match &mut self.data {
            EventData::Navigation(data) => Ok(data),
            other => Err(unexpected(&self.event, "navigation", other)),
        }
    }

    /// Returns the battle-over payload, mutably.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnexpectedEventData` for any other payload.
    pub fn battle_over_mut(&mut self) -> Result<&mut BattleOverData, EngineError> {
        match &mut self.data {
            EventData::BattleOver(data) => Ok(data),
            other => Err(unexpected(&self.event, "battle over", other)),
        }
    }

    /// Returns the character payload.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::UnexpectedEventData` for any other payload.
    pub fn character(&self) -> Result<&CharacterData, EngineError> {
        match &self.data {
            EventData::Character(data) => Ok(data),
            other => Err(unexpected(&self.event, "character", other)),
        }
    }
}

fn unexpected(event: &str, expected: &'static str, found: &EventData) -> EngineError {
    tracing::warn!(event, expected, found = found.kind(), "event carried unexpected data");
    EngineError::UnexpectedEventData {
        event: event.to_owned(),
        expected,
    }
}

/// Publishes domain events to the bus.
///
/// Published events are dispatched after the publishing handler returns.
pub trait EventPublisher: Send + Sync {
    /// Queues an event for dispatch.
    fn publish(&self, event: &str, data: EventData);
}
