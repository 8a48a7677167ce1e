//! Traits the engine uses to talk to modules.

use async_trait::async_trait;

use crate::character::Character;
use crate::error::EngineError;
use crate::event::EventContext;
use crate::game::Game;
use crate::repository::ModuleRecord;

/// Something that reacts to events from the bus.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles one event, returning the (possibly modified) context for the
    /// next handler.
    async fn handle_event(
        &self,
        game: Game<'_>,
        character: &mut Character,
        context: EventContext,
    ) -> Result<EventContext, EngineError>;
}

/// A pluggable content module.
#[async_trait]
pub trait Module: EventHandler {
    /// Library name the module is installed under.
    fn library(&self) -> &'static str;

    /// Event names the module subscribes to.
    fn subscriptions(&self) -> Vec<String>;

    /// Called once when the module is installed.
    async fn on_register(&self, game: Game<'_>, module: &mut ModuleRecord)
    -> Result<(), EngineError>;

    /// Called once when the module is removed.
    async fn on_unregister(
        &self,
        game: Game<'_>,
        module: &mut ModuleRecord,
    ) -> Result<(), EngineError>;
}
