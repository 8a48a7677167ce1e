//! Green Dragon kills module.
//!
//! Adds the Green Dragon's lair to every forest, lets characters of high
//! enough level challenge the dragon once per game day, and records every
//! successful kill.

pub mod application;
pub mod config;
pub mod domain;
pub mod module;
pub mod scenes;

#[cfg(test)]
mod test_fixtures;

pub use config::DragonKillsConfig;
pub use module::{DragonKillsModule, ModuleEvent};

/// Library name the module is installed under.
pub const LIBRARY: &str = "lotgd/module-dragon-kills";

/// Character property holding the number of dragon kills.
pub const CHARACTER_PROPERTY_DRAGON_KILLS: &str = "lotgd/module-dragon-kills/dk";

/// Character property set once the character has seen the dragon today.
pub const CHARACTER_PROPERTY_SEEN_DRAGON: &str = "lotgd/module-dragon-kills/seenDragon";

/// Module property listing the ids of scenes created at registration.
pub const MODULE_PROPERTY_GENERATED_SCENES: &str = "lotgd/module-dragon-kills/generatedScenes";

/// Event published when a character has slain the dragon.
pub const DRAGON_KILLED_EVENT: &str = "e/lotgd/module-dragon-kills/kill";
