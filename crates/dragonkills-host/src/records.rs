//! In-memory `RecordRepository` implementation.

use std::sync::Mutex;

use async_trait::async_trait;
use dragonkills_core::error::EngineError;
use dragonkills_core::repository::{RecordRepository, StoredRecord};

/// Record store kept in process memory, in persistence order.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: Mutex<Vec<StoredRecord>>,
}

impl InMemoryRecordRepository {
    /// Creates an empty record store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn persist(&self, record: StoredRecord) -> Result<(), EngineError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| EngineError::Infrastructure(format!("record store poisoned: {e}")))?;
        if records.iter().any(|stored| stored.record_id == record.record_id) {
            return Err(EngineError::Infrastructure(format!(
                "duplicate record id {}",
                record.record_id
            )));
        }
        tracing::debug!(record_type = %record.record_type, record_id = %record.record_id, "record persisted");
        records.push(record);
        Ok(())
    }

    async fn find_by_type(&self, record_type: &str) -> Result<Vec<StoredRecord>, EngineError> {
        let records = self
            .records
            .lock()
            .map_err(|e| EngineError::Infrastructure(format!("record store poisoned: {e}")))?;
        Ok(records
            .iter()
            .filter(|record| record.record_type == record_type)
            .cloned()
            .collect())
    }
}
