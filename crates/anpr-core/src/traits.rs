// Core traits for pluggable backends
//
// These traits allow the resolver to be used with different backends:
// - In-memory implementations for tests
// - Database implementations for production

use async_trait::async_trait;
use uuid::Uuid;

use crate::detection::Detection;
use crate::error::Result;
use crate::event::Event;

// ============================================================================
// EventStore - Point lookup of events
// ============================================================================

/// Trait for looking up events by primary key
///
/// Implementations must accept stale or unknown ids and answer `Ok(None)`.
/// `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Get an event by id
    async fn get_event(&self, event_id: Uuid) -> Result<Option<Event>>;
}

// ============================================================================
// DetectionStore - Point lookup of detections
// ============================================================================

/// Trait for looking up detections by primary key
#[async_trait]
pub trait DetectionStore: Send + Sync {
    /// Get a detection by id
    async fn get_detection(&self, detection_id: Uuid) -> Result<Option<Detection>>;
}
