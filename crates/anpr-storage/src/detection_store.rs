// Database-backed DetectionStore implementation

use anpr_core::{traits::DetectionStore, Detection, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::classify;
use crate::repositories::Database;

/// Database-backed detection store
#[derive(Clone)]
pub struct DbDetectionStore {
    db: Database,
}

impl DbDetectionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DetectionStore for DbDetectionStore {
    async fn get_detection(&self, detection_id: Uuid) -> Result<Option<Detection>> {
        let row = self
            .db
            .get_detection(detection_id)
            .await
            .map_err(classify)?;

        if row.is_none() {
            tracing::trace!(detection_id = %detection_id, "Detection lookup returned no row");
        }

        Ok(row.map(Detection::from))
    }
}

/// Create a database-backed detection store
pub fn create_db_detection_store(db: Database) -> DbDetectionStore {
    DbDetectionStore::new(db)
}
