//! Persistence abstractions offered by the engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::property::PropertyBag;
use crate::scene::{Scene, SceneConnection};

/// Stored representation of a module-defined entity.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Unique record identifier.
    pub record_id: Uuid,
    /// Record type name, used as the table/collection name.
    pub record_type: String,
    /// Serialized record payload.
    pub payload: serde_json::Value,
    /// Timestamp of persistence.
    pub stored_at: DateTime<Utc>,
}

/// Repository for module-defined entities.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Persists a new record.
    async fn persist(&self, record: StoredRecord) -> Result<(), EngineError>;

    /// Loads all records of a type, in persistence order.
    async fn find_by_type(&self, record_type: &str) -> Result<Vec<StoredRecord>, EngineError>;
}

/// Repository for the scene graph.
#[async_trait]
pub trait SceneRepository: Send + Sync {
    /// Loads a scene by id.
    async fn find(&self, scene_id: Uuid) -> Result<Option<Scene>, EngineError>;

    /// Loads all scenes built from the given template class.
    async fn find_by_template(&self, template: &str) -> Result<Vec<Scene>, EngineError>;

    /// Inserts or replaces a scene.
    async fn save(&self, scene: Scene) -> Result<(), EngineError>;

    /// Removes a scene together with its connections.
    async fn remove(&self, scene_id: Uuid) -> Result<(), EngineError>;

    /// Adds a connection between two stored scenes.
    async fn connect(&self, connection: SceneConnection) -> Result<(), EngineError>;

    /// Returns all connections touching the scene.
    async fn connections(&self, scene_id: Uuid) -> Result<Vec<SceneConnection>, EngineError>;

    /// Returns every scene connected to the given one, regardless of
    /// direction, in connection order.
    async fn connected_scenes(&self, scene_id: Uuid) -> Result<Vec<Scene>, EngineError>;
}

/// A module's own configuration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Library name the module was installed under.
    pub library: String,
    /// Properties owned by the module.
    pub properties: PropertyBag,
}

impl ModuleRecord {
    /// Creates a record without properties.
    #[must_use]
    pub fn new(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            properties: PropertyBag::new(),
        }
    }
}
