//! Command handlers of the dragon kills module.
//!
//! Each handler changes the acting character and persists whatever the
//! change produced.

use dragonkills_core::character::Character;
use dragonkills_core::error::EngineError;
use dragonkills_core::game::Game;

use crate::config::PrestigeReset;
use crate::domain::character_ext::CharacterDragonKillExt;
use crate::domain::dragon_kill::DragonKill;

/// Handles a dragon kill: stores a `DragonKill` record, bumps the
/// character's kill count and resets the character to a fresh start.
///
/// # Errors
///
/// Returns `EngineError::Property` if the stored kill count is corrupt, in
/// which case nothing is persisted, or any error raised while persisting the
/// record. The character is left unchanged on error.
pub async fn handle_dragon_killed(
    game: Game<'_>,
    character: &mut Character,
    reset: &PrestigeReset,
) -> Result<DragonKill, EngineError> {
    let kills = character.dragon_kill_count()?.saturating_add(1);
    let kill = DragonKill::new(character, game.time_keeper.game_time(), game.clock.now());
    game.records.persist(kill.to_stored_record()?).await?;

    character.set_dragon_kill_count(kills)?;
    apply_prestige_reset(character, reset);

    tracing::info!(%character, kills, kill_id = %kill.id(), "dragon kill recorded");
    Ok(kill)
}

/// Clears the seen-today flag so the dragon can be challenged again.
///
/// # Errors
///
/// Returns `EngineError::Property` if the flag cannot be stored.
pub fn handle_new_day(character: &mut Character) -> Result<(), EngineError> {
    character.set_seen_dragon(false)
}

fn apply_prestige_reset(character: &mut Character, reset: &PrestigeReset) {
    character.level = reset.level;
    character.max_health = reset.max_health;
    character.health = reset.max_health;
    character.experience = 0;
    character.required_experience = reset.required_experience;
    if !reset.keep_gold {
        character.gold = 0;
    }
}
