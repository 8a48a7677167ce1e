//! The `DragonKill` record.

use chrono::{DateTime, Utc};
use dragonkills_core::character::Character;
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::StoredRecord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record type dragon kills are stored under.
pub const RECORD_TYPE: &str = "lotgd_dragon_kills";

/// A successful fight against the dragon.
///
/// Created once per kill and never changed afterwards. The killer id is
/// optional so that kills survive the deletion of the character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragonKill {
    id: Uuid,
    killer_id: Option<Uuid>,
    killed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl DragonKill {
    /// Records a kill by `killer` at in-game time `killed_at`, created at
    /// wall time `created_at`.
    #[must_use]
    pub fn new(killer: &Character, killed_at: DateTime<Utc>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            killer_id: Some(killer.id),
            killed_at,
            created_at,
        }
    }

    /// Unique id of the kill.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The character that slew the dragon, if still known.
    #[must_use]
    pub fn killer_id(&self) -> Option<Uuid> {
        self.killer_id
    }

    /// In-game time of the kill.
    #[must_use]
    pub fn killed_at(&self) -> DateTime<Utc> {
        self.killed_at
    }

    /// Wall time the record was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Converts the kill into its stored form.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Infrastructure` if serialization fails.
    pub fn to_stored_record(&self) -> Result<StoredRecord, EngineError> {
        let payload = serde_json::to_value(self)
            .map_err(|e| EngineError::Infrastructure(format!("record serialization failed: {e}")))?;
        Ok(StoredRecord {
            record_id: self.id,
            record_type: RECORD_TYPE.to_owned(),
            payload,
            stored_at: self.created_at,
        })
    }

    /// Reads a kill back from its stored form.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Infrastructure` if the record has another type
    /// or its payload does not describe a kill.
    pub fn from_stored_record(record: &StoredRecord) -> Result<Self, EngineError> {
        if record.record_type != RECORD_TYPE {
            return Err(EngineError::Infrastructure(format!(
                "record {} has type {}, expected {RECORD_TYPE}",
                record.record_id, record.record_type
            )));
        }
        serde_json::from_value(record.payload.clone())
            .map_err(|e| EngineError::Infrastructure(format!("record deserialization failed: {e}")))
    }
}
