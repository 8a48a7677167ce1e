//! The services a module handler can reach during one request.

use crate::battle::FightStarter;
use crate::clock::{Clock, TimeKeeper};
use crate::event::EventPublisher;
use crate::repository::{RecordRepository, SceneRepository};
use crate::template::TemplateRegistry;

/// Engine services handed to module handlers.
///
/// Borrowed for the duration of a request; the character being played is
/// passed separately because it is the only thing handlers mutate.
#[derive(Clone, Copy)]
pub struct Game<'a> {
    /// Wall clock.
    pub clock: &'a dyn Clock,
    /// In-game clock.
    pub time_keeper: &'a dyn TimeKeeper,
    /// Scene graph storage.
    pub scenes: &'a dyn SceneRepository,
    /// Module-defined entity storage.
    pub records: &'a dyn RecordRepository,
    /// Scene template registry.
    pub templates: &'a dyn TemplateRegistry,
    /// Event bus.
    pub events: &'a dyn EventPublisher,
    /// Battle system.
    pub fights: &'a dyn FightStarter,
}
