//! In-memory `SceneRepository` implementation.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::SceneRepository;
use dragonkills_core::scene::{Scene, SceneConnection};
use uuid::Uuid;

#[derive(Debug, Default)]
struct SceneGraph {
    scenes: BTreeMap<Uuid, Scene>,
    connections: Vec<SceneConnection>,
}

/// Scene graph kept in process memory.
#[derive(Debug, Default)]
pub struct InMemorySceneRepository {
    graph: Mutex<SceneGraph>,
}

impl InMemorySceneRepository {
    /// Creates an empty scene graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, SceneGraph>, EngineError> {
        self.graph
            .lock()
            .map_err(|e| EngineError::Infrastructure(format!("scene store poisoned: {e}")))
    }

    /// Returns the number of stored scenes.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Infrastructure` if the store lock is poisoned.
    pub fn scene_count(&self) -> Result<usize, EngineError> {
        Ok(self.lock()?.scenes.len())
    }
}

#[async_trait]
impl SceneRepository for InMemorySceneRepository {
    async fn find(&self, scene_id: Uuid) -> Result<Option<Scene>, EngineError> {
        Ok(self.lock()?.scenes.get(&scene_id).cloned())
    }

    async fn find_by_template(&self, template: &str) -> Result<Vec<Scene>, EngineError> {
        Ok(self
            .lock()?
            .scenes
            .values()
            .filter(|scene| scene.has_template(template))
            .cloned()
            .collect())
    }

    async fn save(&self, scene: Scene) -> Result<(), EngineError> {
        self.lock()?.scenes.insert(scene.id, scene);
        Ok(())
    }

    async fn remove(&self, scene_id: Uuid) -> Result<(), EngineError> {
        let mut graph = self.lock()?;
        if graph.scenes.remove(&scene_id).is_none() {
            return Err(EngineError::SceneNotFound(scene_id));
        }
        graph
            .connections
            .retain(|connection| !connection.touches(scene_id));
        Ok(())
    }

    async fn connect(&self, connection: SceneConnection) -> Result<(), EngineError> {
        let mut graph = self.lock()?;
        for scene_id in [connection.outgoing_scene, connection.incoming_scene] {
            if !graph.scenes.contains_key(&scene_id) {
                return Err(EngineError::SceneNotFound(scene_id));
            }
        }
        graph.connections.push(connection);
        Ok(())
    }

    async fn connections(&self, scene_id: Uuid) -> Result<Vec<SceneConnection>, EngineError> {
        Ok(self
            .lock()?
            .connections
            .iter()
            .filter(|connection| connection.touches(scene_id))
            .cloned()
            .collect())
    }

    async fn connected_scenes(&self, scene_id: Uuid) -> Result<Vec<Scene>, EngineError> {
        let graph = self.lock()?;
        Ok(graph
            .connections
            .iter()
            .filter_map(|connection| connection.other_end(scene_id))
            .filter_map(|other| graph.scenes.get(&other).cloned())
            .collect())
    }
}
