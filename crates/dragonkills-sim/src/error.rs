//! Simulation error types.

use dragonkills_core::error::EngineError;
use dragonkills_module::config::ConfigError;
use thiserror::Error;

/// Startup and runtime errors of the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Env(String),

    /// The module configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The engine or the module failed.
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// The report could not be written.
    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),

    /// A viewpoint did not offer an expected action.
    #[error("no action {title:?} on {scene}")]
    MissingAction {
        /// Title of the wanted action.
        title: String,
        /// Title of the viewpoint searched.
        scene: String,
    },
}
