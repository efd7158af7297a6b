// Database models (internal, may differ from core entities)

use anpr_core::{Detection, Event, EventType};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Detection models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct DetectionRow {
    pub id: Uuid,
    pub image_path: String,
    pub vrm: Option<String>,
    pub camera_id: Option<String>,
    pub direction: Option<String>,
    pub confidence: Option<f32>,
    pub country: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateDetection {
    pub id: Uuid,
    pub image_path: String,
    pub vrm: Option<String>,
    pub camera_id: Option<String>,
    pub direction: Option<String>,
    pub confidence: Option<f32>,
    pub country: Option<String>,
    pub captured_at: Option<DateTime<Utc>>,
}

impl From<DetectionRow> for Detection {
    fn from(row: DetectionRow) -> Self {
        Detection {
            id: row.id,
            image_path: row.image_path,
            vrm: row.vrm,
            camera_id: row.camera_id,
            direction: row.direction,
            confidence: row.confidence,
            country: row.country,
            captured_at: row.captured_at,
            created_at: row.created_at,
        }
    }
}

// ============================================
// Event models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub event_type: String,
    pub entry_detection_id: Option<Uuid>,
    pub exit_detection_id: Option<Uuid>,
    pub site_id: Option<String>,
    pub vrm: Option<String>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub entry_camera_id: Option<String>,
    pub exit_camera_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub id: Uuid,
    pub event_type: EventType,
    pub entry_detection_id: Option<Uuid>,
    pub exit_detection_id: Option<Uuid>,
    pub site_id: Option<String>,
    pub vrm: Option<String>,
    pub entry_time: Option<DateTime<Utc>>,
    pub exit_time: Option<DateTime<Utc>>,
    pub entry_camera_id: Option<String>,
    pub exit_camera_id: Option<String>,
}

impl CreateEvent {
    /// Insert input with only the type and detection references set
    pub fn new(
        event_type: EventType,
        entry_detection_id: Option<Uuid>,
        exit_detection_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_type,
            entry_detection_id,
            exit_detection_id,
            site_id: None,
            vrm: None,
            entry_time: None,
            exit_time: None,
            entry_camera_id: None,
            exit_camera_id: None,
        }
    }
}

impl From<&Event> for CreateEvent {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            event_type: event.event_type.clone(),
            entry_detection_id: event.entry_detection_id,
            exit_detection_id: event.exit_detection_id,
            site_id: event.site_id.clone(),
            vrm: event.vrm.clone(),
            entry_time: event.entry_time,
            exit_time: event.exit_time,
            entry_camera_id: event.entry_camera_id.clone(),
            exit_camera_id: event.exit_camera_id.clone(),
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            event_type: EventType::from(row.event_type),
            entry_detection_id: row.entry_detection_id,
            exit_detection_id: row.exit_detection_id,
            site_id: row.site_id,
            vrm: row.vrm,
            entry_time: row.entry_time,
            exit_time: row.exit_time,
            entry_camera_id: row.entry_camera_id,
            exit_camera_id: row.exit_camera_id,
            created_at: row.created_at,
        }
    }
}
