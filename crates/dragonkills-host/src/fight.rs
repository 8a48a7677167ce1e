//! A minimal round-based battle system.
//!
//! Characters attack with three points and defend with two points per
//! level; each side adds a roll of up to its level. The character strikes
//! first. Every hit deals at least one point of damage.

use std::sync::{Mutex, PoisonError};

use dragonkills_core::battle::{Combatant, Creature, FightStarter};
use dragonkills_core::character::Character;
use dragonkills_core::contracts::res_fight;
use dragonkills_core::error::EngineError;
use dragonkills_core::rng::DeterministicRng;
use dragonkills_core::viewpoint::{Action, ActionGroup, Viewpoint};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Parameter marking an action as a fight action.
pub const FIGHT_PARAMETER: &str = "fight";

/// A suspended battle, stored on the character between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    /// The opponent, with its remaining health.
    pub creature: Creature,
    /// The scene the battle was started from.
    pub referrer_scene_id: Uuid,
    /// The encounter identifier handed back in the battle-over hook.
    pub battle_context: String,
}

/// Result of one battle round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both sides are still standing.
    Ongoing {
        /// Damage dealt by the character.
        dealt: u32,
        /// Damage taken by the character.
        taken: u32,
    },
    /// The battle ended.
    Finished {
        /// The survivor.
        winner: Combatant,
    },
}

/// Battle system driven by a deterministic RNG.
pub struct RoundFight {
    rng: Mutex<Box<dyn DeterministicRng>>,
}

impl RoundFight {
    /// Creates a battle system.
    #[must_use]
    pub fn new(rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Plays one round, updating both sides' health.
    pub fn round(&self, character: &mut Character, state: &mut BattleState) -> RoundOutcome {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let creature = &mut state.creature;

        let attack = character.level * 3 + rng.next_u32_range(0, character.level);
        let dealt = attack.saturating_sub(creature.defense).max(1);
        creature.health = creature.health.saturating_sub(dealt);
        if creature.health == 0 {
            return RoundOutcome::Finished {
                winner: Combatant::Character(character.id),
            };
        }

        let attack = creature.attack + rng.next_u32_range(0, creature.level);
        let taken = attack.saturating_sub(character.level * 2).max(1);
        character.health = character.health.saturating_sub(taken);
        if character.health == 0 {
            return RoundOutcome::Finished {
                winner: Combatant::Creature(creature.name.clone()),
            };
        }

        RoundOutcome::Ongoing { dealt, taken }
    }

    /// Replaces the viewpoint's actions with the fight actions.
    pub fn show_fight_actions(viewpoint: &mut Viewpoint, referrer_scene_id: Uuid) {
        viewpoint.clear_action_groups();
        let mut group = ActionGroup::new(res_fight::FIGHT_GROUP, "Fight", 0);
        group.add_action(Action::new(referrer_scene_id, "Attack").with_parameter(FIGHT_PARAMETER, "attack"));
        viewpoint.add_action_group(group);
    }
}

impl FightStarter for RoundFight {
    fn start(
        &self,
        character: &mut Character,
        creature: Creature,
        referrer_scene_id: Uuid,
        battle_context: &str,
        viewpoint: &mut Viewpoint,
    ) -> Result<(), EngineError> {
        tracing::debug!(%character, creature = %creature.name, battle_context, "battle started");
        let state = BattleState {
            creature,
            referrer_scene_id,
            battle_context: battle_context.to_owned(),
        };
        character.set_property(res_fight::PROPERTY_BATTLE_STATE, &state)?;
        Self::show_fight_actions(viewpoint, referrer_scene_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dragonkills_test_support::{MockRng, SequenceRng};

    fn dragon() -> Creature {
        Creature {
            name: "The Green Dragon".to_owned(),
            weapon: "Great Flaming Maw".to_owned(),
            level: 18,
            attack: 45,
            defense: 25,
            max_health: 300,
            health: 300,
        }
    }

    fn hero(level: u32, health: u32) -> Character {
        let mut character = Character::new(Uuid::new_v4(), "Hero");
        character.level = level;
        character.health = health;
        character.max_health = health;
        character
    }

    fn state() -> BattleState {
        BattleState {
            creature: dragon(),
            referrer_scene_id: Uuid::new_v4(),
            battle_context: "ctx".to_owned(),
        }
    }

    #[test]
    fn test_round_exchanges_blows() {
        // Arrange
        let fight = RoundFight::new(Box::new(MockRng));
        let mut character = hero(15, 150);
        let mut state = state();

        // Act
        let outcome = fight.round(&mut character, &mut state);

        // Assert
        assert_eq!(outcome, RoundOutcome::Ongoing { dealt: 20, taken: 15 });
        assert_eq!(state.creature.health, 280);
        assert_eq!(character.health, 135);
    }

    #[test]
    fn test_rolls_add_to_attacks() {
        // Arrange
        let fight = RoundFight::new(Box::new(SequenceRng::new(vec![10, 18])));
        let mut character = hero(15, 150);
        let mut state = state();

        // Act
        let outcome = fight.round(&mut character, &mut state);

        // Assert
        assert_eq!(outcome, RoundOutcome::Ongoing { dealt: 30, taken: 33 });
        assert_eq!(state.creature.health, 270);
    }

    #[test]
    fn test_weak_character_loses() {
        // Arrange
        let fight = RoundFight::new(Box::new(MockRng));
        let mut character = hero(1, 10);
        let mut state = state();

        // Act
        let outcome = fight.round(&mut character, &mut state);

        // Assert
        assert_eq!(
            outcome,
            RoundOutcome::Finished {
                winner: Combatant::Creature("The Green Dragon".to_owned())
            }
        );
        assert!(!character.is_alive());
    }

    #[test]
    fn test_start_stores_battle_state_and_shows_attack() {
        // Arrange
        let fight = RoundFight::new(Box::new(MockRng));
        let mut character = hero(15, 150);
        let scene_id = Uuid::new_v4();
        let mut viewpoint = Viewpoint::new(scene_id, "Cave", "Dark.");

        // Act
        fight
            .start(&mut character, dragon(), scene_id, "ctx", &mut viewpoint)
            .unwrap();

        // Assert
        let stored: Option<BattleState> = character
            .properties
            .get(res_fight::PROPERTY_BATTLE_STATE)
            .unwrap();
        assert_eq!(stored.unwrap().battle_context, "ctx");
        let titles: Vec<&str> = viewpoint.actions().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["Attack"]);
    }
}
