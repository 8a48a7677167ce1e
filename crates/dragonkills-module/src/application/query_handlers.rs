//! Query handlers of the dragon kills module.
//!
//! Read stored `DragonKill` records and return read-only views.

use chrono::{DateTime, Utc};
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::RecordRepository;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::dragon_kill::{DragonKill, RECORD_TYPE};

/// Read-only view of a dragon kill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DragonKillView {
    /// The kill identifier.
    pub kill_id: Uuid,
    /// The character that slew the dragon, if still known.
    pub killer_id: Option<Uuid>,
    /// In-game time of the kill.
    pub killed_at: DateTime<Utc>,
    /// Wall time the kill was recorded.
    pub created_at: DateTime<Utc>,
}

impl From<&DragonKill> for DragonKillView {
    fn from(kill: &DragonKill) -> Self {
        Self {
            kill_id: kill.id(),
            killer_id: kill.killer_id(),
            killed_at: kill.killed_at(),
            created_at: kill.created_at(),
        }
    }
}

/// Lists the kills of one character, oldest first.
///
/// # Errors
///
/// Returns `EngineError::Infrastructure` if loading or decoding a record
/// fails.
pub async fn list_dragon_kills(
    records: &dyn RecordRepository,
    character_id: Uuid,
) -> Result<Vec<DragonKillView>, EngineError> {
    let mut kills: Vec<DragonKillView> = load_kills(records)
        .await?
        .iter()
        .filter(|kill| kill.killer_id() == Some(character_id))
        .map(DragonKillView::from)
        .collect();
    kills.sort_by_key(|kill| kill.killed_at);
    Ok(kills)
}

/// Counts every stored kill, whoever made it.
///
/// # Errors
///
/// Returns `EngineError::Infrastructure` if loading the records fails.
pub async fn count_dragon_kills(records: &dyn RecordRepository) -> Result<usize, EngineError> {
    Ok(records.find_by_type(RECORD_TYPE).await?.len())
}

async fn load_kills(records: &dyn RecordRepository) -> Result<Vec<DragonKill>, EngineError> {
    records
        .find_by_type(RECORD_TYPE)
        .await?
        .iter()
        .map(DragonKill::from_stored_record)
        .collect()
}
