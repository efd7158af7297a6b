// Postgres storage layer with sqlx
//
// This crate provides database implementations for core traits:
// - DbEventStore: implements EventStore for event lookups
// - DbDetectionStore: implements DetectionStore for detection lookups

pub mod detection_store;
pub mod error;
pub mod event_store;
pub mod models;
pub mod repositories;

pub use detection_store::{create_db_detection_store, DbDetectionStore};
pub use error::classify;
pub use event_store::{create_db_event_store, DbEventStore};
pub use models::*;
pub use repositories::*;
