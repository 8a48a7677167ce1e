//! The player character as seen by modules.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::property::PropertyBag;

/// A player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Current level.
    pub level: u32,
    /// Current health; the character is dead at zero.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Gold carried.
    pub gold: u64,
    /// Experience gathered in the current level.
    pub experience: u64,
    /// Experience needed for the next level.
    pub required_experience: u64,
    /// Properties owned by modules.
    pub properties: PropertyBag,
}

impl Character {
    /// Creates a level 1 character with full health.
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            health: 10,
            max_health: 10,
            gold: 0,
            experience: 0,
            required_experience: 100,
            properties: PropertyBag::new(),
        }
    }

    /// Returns `true` while the character has health left.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Reads a property, falling back to `default` if unset.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if the stored value has another type.
    pub fn property_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, EngineError> {
        self.properties.get_or(key, default)
    }

    /// Writes a property.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Property` if `value` cannot be serialized.
    pub fn set_property<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), EngineError> {
        self.properties.set(key, value)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
