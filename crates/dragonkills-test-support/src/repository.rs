//! Test repositories: failing implementations for error-path tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::{RecordRepository, SceneRepository, StoredRecord};
use dragonkills_core::scene::{Scene, SceneConnection};
use uuid::Uuid;

/// A record repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingRecordRepository;

#[async_trait]
impl RecordRepository for FailingRecordRepository {
    async fn persist(&self, _record: StoredRecord) -> Result<(), EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn find_by_type(&self, _record_type: &str) -> Result<Vec<StoredRecord>, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }
}

/// A scene repository that always returns an infrastructure error.
#[derive(Debug)]
pub struct FailingSceneRepository;

#[async_trait]
impl SceneRepository for FailingSceneRepository {
    async fn find(&self, _scene_id: Uuid) -> Result<Option<Scene>, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn find_by_template(&self, _template: &str) -> Result<Vec<Scene>, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn save(&self, _scene: Scene) -> Result<(), EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn remove(&self, _scene_id: Uuid) -> Result<(), EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn connect(&self, _connection: SceneConnection) -> Result<(), EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn connections(&self, _scene_id: Uuid) -> Result<Vec<SceneConnection>, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }

    async fn connected_scenes(&self, _scene_id: Uuid) -> Result<Vec<Scene>, EngineError> {
        Err(EngineError::Infrastructure("connection refused".into()))
    }
}

/// Wraps a scene repository and fails every `connect` after the first
/// `successes` calls.
#[derive(Debug)]
pub struct FlakySceneRepository<R> {
    inner: R,
    remaining: AtomicUsize,
}

impl<R> FlakySceneRepository<R> {
    /// Lets `successes` connections through before failing.
    #[must_use]
    pub fn new(inner: R, successes: usize) -> Self {
        Self {
            inner,
            remaining: AtomicUsize::new(successes),
        }
    }
}

#[async_trait]
impl<R: SceneRepository> SceneRepository for FlakySceneRepository<R> {
    async fn find(&self, scene_id: Uuid) -> Result<Option<Scene>, EngineError> {
        self.inner.find(scene_id).await
    }

    async fn find_by_template(&self, template: &str) -> Result<Vec<Scene>, EngineError> {
        self.inner.find_by_template(template).await
    }

    async fn save(&self, scene: Scene) -> Result<(), EngineError> {
        self.inner.save(scene).await
    }

    async fn remove(&self, scene_id: Uuid) -> Result<(), EngineError> {
        self.inner.remove(scene_id).await
    }

    async fn connect(&self, connection: SceneConnection) -> Result<(), EngineError> {
        let allowed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if !allowed {
            return Err(EngineError::Infrastructure("connection refused".into()));
        }
        self.inner.connect(connection).await
    }

    async fn connections(&self, scene_id: Uuid) -> Result<Vec<SceneConnection>, EngineError> {
        self.inner.connections(scene_id).await
    }

    async fn connected_scenes(&self, scene_id: Uuid) -> Result<Vec<Scene>, EngineError> {
        self.inner.connected_scenes(scene_id).await
    }
}
