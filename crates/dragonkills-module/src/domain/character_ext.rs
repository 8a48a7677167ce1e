//! Dragon-related character properties.

use dragonkills_core::character::Character;
use dragonkills_core::error::EngineError;

use crate::{CHARACTER_PROPERTY_DRAGON_KILLS, CHARACTER_PROPERTY_SEEN_DRAGON};

/// Accessors for the properties this module keeps on a character.
pub trait CharacterDragonKillExt {
    /// Number of times the character has slain the dragon, `0` if unset.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored value is not a count.
    fn dragon_kill_count(&self) -> Result<u32, EngineError>;

    /// Overwrites the kill count.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the value cannot be stored.
    fn set_dragon_kill_count(&mut self, kills: u32) -> Result<(), EngineError>;

    /// Adds `additional` kills and returns the new count.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the count cannot be read or stored.
    fn increment_dragon_kill_count(&mut self, additional: u32) -> Result<u32, EngineError>;

    /// Whether the character has already seen the dragon today.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored value is not a flag.
    fn has_seen_dragon(&self) -> Result<bool, EngineError>;

    /// Sets the seen-today flag.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the value cannot be stored.
    fn set_seen_dragon(&mut self, seen: bool) -> Result<(), EngineError>;
}

impl CharacterDragonKillExt for Character {
    fn dragon_kill_count(&self) -> Result<u32, EngineError> {
        self.property_or(CHARACTER_PROPERTY_DRAGON_KILLS, 0)
    }

    fn set_dragon_kill_count(&mut self, kills: u32) -> Result<(), EngineError> {
        self.set_property(CHARACTER_PROPERTY_DRAGON_KILLS, &kills)
    }

    fn increment_dragon_kill_count(&mut self, additional: u32) -> Result<u32, EngineError> {
        let kills = self.dragon_kill_count()?.saturating_add(additional);
        self.set_dragon_kill_count(kills)?;
        Ok(kills)
    }

    fn has_seen_dragon(&self) -> Result<bool, EngineError> {
        self.property_or(CHARACTER_PROPERTY_SEEN_DRAGON, false)
    }

    fn set_seen_dragon(&mut self, seen: bool) -> Result<(), EngineError> {
        self.set_property(CHARACTER_PROPERTY_SEEN_DRAGON, &seen)
    }
}
