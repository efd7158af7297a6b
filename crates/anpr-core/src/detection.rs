// Detection entity type
//
// A single camera capture. The image path is opaque here: it may be a
// filesystem path, a URL or a storage key, and is returned as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Detection - one captured observation holding an image reference
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub id: Uuid,
    pub image_path: String,
    /// Registration mark as read by the camera
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
    /// Travel direction reported by the camera (e.g. "in", "out")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    /// Read confidence, 0-100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// When the camera captured the image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Detection {
    pub fn new(image_path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            image_path: image_path.into(),
            vrm: None,
            camera_id: None,
            direction: None,
            confidence: None,
            country: None,
            captured_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_camera(mut self, camera_id: impl Into<String>) -> Self {
        self.camera_id = Some(camera_id.into());
        self
    }

    pub fn with_vrm(mut self, vrm: impl Into<String>) -> Self {
        self.vrm = Some(vrm.into());
        self
    }
}
