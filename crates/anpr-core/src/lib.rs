// ANPR event abstractions
//
// This crate provides a DB-agnostic implementation of the event image lookup
// (Event -> entry Detection -> optional exit Detection).
//
// Key design decisions:
// - Uses traits (EventStore, DetectionStore) for pluggable backends
// - Not-found is a value (Ok(None)), infrastructure failure is a StoreError
// - The resolver never fails: every failure collapses into EventImages
// - ImageOutcome keeps the failure cause inspectable for logs and tests

// Domain entity types
pub mod detection;
pub mod event;

pub mod error;
pub mod resolver;
pub mod traits;

// In-memory implementations for tests
pub mod memory;

// Re-exports for convenience
pub use detection::Detection;
pub use error::{Result, StoreError};
pub use event::{Event, EventType};
pub use memory::{InMemoryDetectionStore, InMemoryEventStore};
pub use resolver::{EventImageResolver, EventImages, ImageOutcome};
pub use traits::{DetectionStore, EventStore};
