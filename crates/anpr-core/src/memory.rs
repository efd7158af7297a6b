// In-memory implementations for tests
//
// These implementations keep all data in memory and record every lookup,
// so tests can count store calls and inject failures without a database.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::detection::Detection;
use crate::error::{Result, StoreError};
use crate::event::Event;
use crate::traits::{DetectionStore, EventStore};

// ============================================================================
// InMemoryEventStore - Stores events in memory
// ============================================================================

/// In-memory event store
///
/// Stores events in a HashMap keyed by event ID. Every lookup is recorded,
/// and the store can be switched into a failing mode.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
    lookups: Arc<RwLock<Vec<Uuid>>>,
    failure: Arc<RwLock<Option<StoreError>>>,
}

impl InMemoryEventStore {
    /// Create a new in-memory event store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event to the store
    pub async fn add_event(&self, event: Event) {
        self.events.write().await.insert(event.id, event);
    }

    /// Make every subsequent lookup fail with `error`
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    /// Stop failing lookups
    pub async fn recover(&self) {
        *self.failure.write().await = None;
    }

    /// Ids passed to `get_event`, in call order
    pub async fn lookups(&self) -> Vec<Uuid> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>> {
        self.lookups.write().await.push(event_id);

        if let Some(err) = self.failure.read().await.as_ref() {
            return Err(err.clone());
        }

        Ok(self.events.read().await.get(&event_id).cloned())
    }
}

// ============================================================================
// InMemoryDetectionStore - Stores detections in memory
// ============================================================================

/// In-memory detection store
///
/// Stores detections in a HashMap keyed by detection ID. A failure can be
/// scoped to a single id, so a test can break the exit lookup while the
/// entry lookup still succeeds.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDetectionStore {
    detections: Arc<RwLock<HashMap<Uuid, Detection>>>,
    lookups: Arc<RwLock<Vec<Uuid>>>,
    failure: Arc<RwLock<Option<StoreError>>>,
    failing_ids: Arc<RwLock<HashMap<Uuid, StoreError>>>,
}

impl InMemoryDetectionStore {
    /// Create a new in-memory detection store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detection to the store
    pub async fn add_detection(&self, detection: Detection) {
        self.detections.write().await.insert(detection.id, detection);
    }

    /// Make every subsequent lookup fail with `error`
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    /// Make lookups of one detection id fail with `error`
    pub async fn fail_on(&self, detection_id: Uuid, error: StoreError) {
        self.failing_ids.write().await.insert(detection_id, error);
    }

    /// Stop failing lookups
    pub async fn recover(&self) {
        *self.failure.write().await = None;
        self.failing_ids.write().await.clear();
    }

    /// Ids passed to `get_detection`, in call order
    pub async fn lookups(&self) -> Vec<Uuid> {
        self.lookups.read().await.clone()
    }
}

#[async_trait]
impl DetectionStore for InMemoryDetectionStore {
    async fn get_detection(&self, detection_id: Uuid) -> Result<Option<Detection>> {
        self.lookups.write().await.push(detection_id);

        if let Some(err) = self.failure.read().await.as_ref() {
            return Err(err.clone());
        }
        if let Some(err) = self.failing_ids.read().await.get(&detection_id) {
            return Err(err.clone());
        }

        Ok(self.detections.read().await.get(&detection_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_event_store() {
        let store = InMemoryEventStore::new();
        let event = Event::standard(Uuid::now_v7(), None);
        let event_id = event.id;
        store.add_event(event).await;

        let found = store.get_event(event_id).await.unwrap();
        assert_eq!(found.map(|e| e.id), Some(event_id));

        let missing = store.get_event(Uuid::now_v7()).await.unwrap();
        assert!(missing.is_none());

        assert_eq!(store.lookups().await.len(), 2);
    }

    #[tokio::test]
    async fn test_event_store_failure_and_recover() {
        let store = InMemoryEventStore::new();
        store.fail_with(StoreError::unavailable("db down")).await;

        let err = store.get_event(Uuid::now_v7()).await.unwrap_err();
        assert_eq!(err.kind(), "unavailable");

        store.recover().await;
        assert!(store.get_event(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detection_store_fail_on_single_id() {
        let store = InMemoryDetectionStore::new();
        let ok = Detection::new("/img/ok.jpg");
        let broken = Detection::new("/img/broken.jpg");
        let (ok_id, broken_id) = (ok.id, broken.id);
        store.add_detection(ok).await;
        store.add_detection(broken).await;
        store
            .fail_on(broken_id, StoreError::decode("bad image_path"))
            .await;

        let found = store.get_detection(ok_id).await.unwrap();
        assert_eq!(found.unwrap().image_path, "/img/ok.jpg");
        assert!(store.get_detection(broken_id).await.is_err());
        assert_eq!(store.lookups().await, vec![ok_id, broken_id]);
    }
}
