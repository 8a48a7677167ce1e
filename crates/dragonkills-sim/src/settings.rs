//! Settings read from the environment.

use std::path::PathBuf;

use dragonkills_module::DragonKillsConfig;

use crate::error::SimError;

/// Simulation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Optional YAML file with the module configuration.
    pub config_path: Option<PathBuf>,
    /// Seed of the battle RNG.
    pub seed: u64,
    /// Level of the simulated hero.
    pub hero_level: u32,
    /// Game days per real day.
    pub days_per_day: u32,
}

impl Settings {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Env` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, SimError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Env` if a variable is set but malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SimError> {
        Ok(Self {
            config_path: lookup("DRAGONKILLS_CONFIG").map(PathBuf::from),
            seed: parse(&lookup, "DRAGONKILLS_SEED", 42)?,
            hero_level: parse(&lookup, "DRAGONKILLS_LEVEL", 15)?,
            days_per_day: parse(&lookup, "DRAGONKILLS_DAYS_PER_DAY", 4)?,
        })
    }

    /// Loads the module configuration, or the defaults without a file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if the file cannot be read or is invalid.
    pub fn module_config(&self) -> Result<DragonKillsConfig, SimError> {
        match &self.config_path {
            Some(path) => Ok(DragonKillsConfig::from_path(path)?),
            None => Ok(DragonKillsConfig::default()),
        }
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, SimError>
where
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|e| SimError::Env(format!("{key} must be a number: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let settings = Settings::from_lookup(|_| None).unwrap();

        assert_eq!(settings.config_path, None);
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.hero_level, 15);
        assert_eq!(settings.days_per_day, 4);
        assert_eq!(settings.module_config().unwrap(), DragonKillsConfig::default());
    }

    #[test]
    fn test_values_are_read_from_lookup() {
        // Arrange
        let lookup = |key: &str| match key {
            "DRAGONKILLS_SEED" => Some("7".to_owned()),
            "DRAGONKILLS_LEVEL" => Some("20".to_owned()),
            "DRAGONKILLS_CONFIG" => Some("/etc/dragonkills.yaml".to_owned()),
            _ => None,
        };

        // Act
        let settings = Settings::from_lookup(lookup).unwrap();

        // Assert
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.hero_level, 20);
        assert_eq!(settings.config_path, Some(PathBuf::from("/etc/dragonkills.yaml")));
    }

    #[test]
    fn test_malformed_number_is_rejected() {
        let result = Settings::from_lookup(|key| (key == "DRAGONKILLS_SEED").then(|| "lots".to_owned()));

        match result.unwrap_err() {
            SimError::Env(message) => assert!(message.contains("DRAGONKILLS_SEED")),
            other => panic!("expected Env, got {other:?}"),
        }
    }
}
