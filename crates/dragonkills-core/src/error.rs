//! Engine error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level engine error type.
///
/// Modules propagate these unchanged; any error aborts the current request.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A scene was not found.
    #[error("scene not found: {0}")]
    SceneNotFound(Uuid),

    /// A scene has no connected scene using the given template.
    #[error("scene {scene_id} has no connected scene with template {template}")]
    NoConnectedScene {
        /// The scene whose connections were searched.
        scene_id: Uuid,
        /// The template that was looked for.
        template: String,
    },

    /// An action was not offered by the current viewpoint.
    #[error("action not found: {0}")]
    ActionNotFound(Uuid),

    /// A viewpoint is missing an action group a handler relies on.
    #[error("action group not found: {0}")]
    ActionGroupNotFound(String),

    /// An event carried a payload the handler cannot work with.
    #[error("unexpected data for event {event}: expected {expected}")]
    UnexpectedEventData {
        /// The event name.
        event: String,
        /// The payload kind that was expected.
        expected: &'static str,
    },

    /// A scene template was used before being registered.
    #[error("scene template not registered: {0}")]
    TemplateNotRegistered(String),

    /// A property value could not be converted.
    #[error("property {key} could not be converted: {source}")]
    Property {
        /// The property key.
        key: String,
        /// The underlying conversion error.
        #[source]
        source: serde_json::Error,
    },

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
