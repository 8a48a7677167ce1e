//! Module configuration.
//!
//! Every field has a default, so an empty YAML document yields the classic
//! Green Dragon encounter.

use std::path::{Path, PathBuf};

use dragonkills_core::battle::Creature;
use serde::{Deserialize, Serialize};

/// Errors raised while loading the module configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    Io {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid YAML for this schema.
    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration of the dragon kills module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragonKillsConfig {
    /// Minimum character level needed to seek out the dragon.
    pub required_level: u32,
    /// The dragon's stats.
    pub dragon: DragonStats,
    /// What a character is reset to after slaying the dragon.
    pub reset: PrestigeReset,
}

impl Default for DragonKillsConfig {
    fn default() -> Self {
        Self {
            required_level: 15,
            dragon: DragonStats::default(),
            reset: PrestigeReset::default(),
        }
    }
}

impl DragonKillsConfig {
    /// Parses and validates a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Yaml` if the document does not match the schema
    /// and `ConfigError::Invalid` if a value is out of range.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`DragonKillsConfig::from_yaml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.required_level == 0 {
            return Err(ConfigError::Invalid("required_level must be at least 1".into()));
        }
        if self.dragon.health == 0 {
            return Err(ConfigError::Invalid("dragon.health must be positive".into()));
        }
        if self.dragon.name.trim().is_empty() {
            return Err(ConfigError::Invalid("dragon.name must not be empty".into()));
        }
        if self.reset.level == 0 {
            return Err(ConfigError::Invalid("reset.level must be at least 1".into()));
        }
        if self.reset.max_health == 0 {
            return Err(ConfigError::Invalid("reset.max_health must be positive".into()));
        }
        Ok(())
    }
}

/// Stats of the dragon fought in the lair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DragonStats {
    /// Display name.
    pub name: String,
    /// Weapon named in battle messages.
    pub weapon: String,
    /// Creature level.
    pub level: u32,
    /// Attack value.
    pub attack: u32,
    /// Defense value.
    pub defense: u32,
    /// Health at the start of the battle.
    pub health: u32,
}

impl Default for DragonStats {
    fn default() -> Self {
        Self {
            name: "The Green Dragon".to_owned(),
            weapon: "Great Flaming Maw".to_owned(),
            level: 18,
            attack: 45,
            defense: 25,
            health: 300,
        }
    }
}

impl DragonStats {
    /// Builds a fresh, unhurt creature from these stats.
    #[must_use]
    pub fn to_creature(&self) -> Creature {
        Creature {
            name: self.name.clone(),
            weapon: self.weapon.clone(),
            level: self.level,
            attack: self.attack,
            defense: self.defense,
            max_health: self.health,
            health: self.health,
        }
    }
}

/// Character values restored after a dragon kill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrestigeReset {
    /// Level the character restarts at.
    pub level: u32,
    /// Maximum health the character restarts with.
    pub max_health: u32,
    /// Experience needed for the next level.
    pub required_experience: u64,
    /// Whether the character keeps their gold.
    pub keep_gold: bool,
}

impl Default for PrestigeReset {
    fn default() -> Self {
        Self {
            level: 1,
            max_health: 10,
            required_experience: 100,
            keep_gold: false,
        }
    }
}
