// Database-backed EventStore implementation
//
// This module implements the core EventStore trait for looking up
// events from the database.

use anpr_core::{traits::EventStore, Event, Result};
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::classify;
use crate::repositories::Database;

// ============================================================================
// DbEventStore - Retrieves events from the database
// ============================================================================

/// Database-backed event store
///
/// Used by EventImageResolver for the first hop of the lookup chain.
#[derive(Clone)]
pub struct DbEventStore {
    db: Database,
}

impl DbEventStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventStore for DbEventStore {
    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
        let row = self.db.get_event(event_id).await.map_err(classify)?;
        Ok(row.map(Event::from))
    }
}

// ============================================================================
// Factory functions
// ============================================================================

/// Create a database-backed event store
pub fn create_db_event_store(db: Database) -> DbEventStore {
    DbEventStore::new(db)
}
