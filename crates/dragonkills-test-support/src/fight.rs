//! Test fight starter: records started fights and shows one attack action.

use std::sync::Mutex;

use dragonkills_core::battle::{Creature, FightStarter};
use dragonkills_core::character::Character;
use dragonkills_core::contracts::res_fight;
use dragonkills_core::error::EngineError;
use dragonkills_core::viewpoint::{Action, ActionGroup, Viewpoint};
use uuid::Uuid;

/// A fight starter that records `(creature, referrer scene, battle context)`
/// for every started fight and replaces the viewpoint's actions with a
/// single "Attack" action.
#[derive(Debug, Default)]
pub struct RecordingFightStarter {
    started: Mutex<Vec<(Creature, Uuid, String)>>,
}

impl RecordingFightStarter {
    /// Creates an empty recording fight starter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all started fights.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn started(&self) -> Vec<(Creature, Uuid, String)> {
        self.started.lock().unwrap().clone()
    }
}

impl FightStarter for RecordingFightStarter {
    fn start(
        &self,
        _character: &mut Character,
        creature: Creature,
        referrer_scene_id: Uuid,
        battle_context: &str,
        viewpoint: &mut Viewpoint,
    ) -> Result<(), EngineError> {
        viewpoint.clear_action_groups();
        let mut group = ActionGroup::new(res_fight::FIGHT_GROUP, "Fight", 0);
        group.add_action(Action::new(referrer_scene_id, "Attack"));
        viewpoint.add_action_group(group);

        self.started.lock().unwrap().push((
            creature,
            referrer_scene_id,
            battle_context.to_owned(),
        ));
        Ok(())
    }
}
