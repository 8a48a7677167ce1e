//! Creatures, battle outcomes and the fight starter seam.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::Character;
use crate::error::EngineError;
use crate::viewpoint::Viewpoint;

/// A monster a character can fight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    /// Display name.
    pub name: String,
    /// Weapon name used in battle messages.
    pub weapon: String,
    /// Creature level.
    pub level: u32,
    /// Attack strength.
    pub attack: u32,
    /// Defense strength.
    pub defense: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Current health.
    pub health: u32,
}

/// A battle participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    /// A player character, by id.
    Character(Uuid),
    /// A creature, by name.
    Creature(String),
}

/// The result of a finished battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battle {
    /// The surviving participant.
    pub winner: Combatant,
}

impl Battle {
    /// Returns `true` if the given character won.
    #[must_use]
    pub fn is_won_by(&self, character: &Character) -> bool {
        self.winner == Combatant::Character(character.id)
    }
}

/// Seam to the engine's battle system.
///
/// Starting a fight shows the fight actions in the viewpoint and suspends
/// the battle until the player acts. When the battle ends the engine
/// publishes the battle-over hook with `battle_context`.
pub trait FightStarter: Send + Sync {
    /// Starts and suspends a fight against `creature`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the battle state cannot be stored.
    fn start(
        &self,
        character: &mut Character,
        creature: Creature,
        referrer_scene_id: Uuid,
        battle_context: &str,
        viewpoint: &mut Viewpoint,
    ) -> Result<(), EngineError>;
}
