// Event domain types
//
// An Event is one vehicle movement through a site. It points at the
// Detection captured on entry and, for non through-traffic events, the one
// captured on exit. The references are plain ids and may dangle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event category
///
/// Stored as free text. Only `through_traffic` changes how images are resolved;
/// every other tag follows the entry/exit path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// Vehicle passed straight through; entry and exit are the same capture
    ThroughTraffic,
    Standard,
    /// Any other tag written by upstream pipelines
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::ThroughTraffic => "through_traffic",
            EventType::Standard => "standard",
            EventType::Other(s) => s,
        }
    }

    pub fn is_through_traffic(&self) -> bool {
        matches!(self, EventType::ThroughTraffic)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        match s {
            "through_traffic" => EventType::ThroughTraffic,
            "standard" => EventType::Standard,
            other => EventType::Other(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        EventType::from(s.as_str())
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        match t {
            EventType::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

/// Event - a recorded vehicle movement with entry/exit capture references
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_detection_id: Option<Uuid>,
    /// Unset while the vehicle is still on site, and never consulted for
    /// through-traffic events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_detection_id: Option<Uuid>,
    /// Car park the event was recorded at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    /// Vehicle registration mark, normalized (no whitespace, upper case)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vrm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_camera_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_camera_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a standard event with an entry capture and an optional exit capture
    pub fn standard(entry_detection_id: Uuid, exit_detection_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_type: EventType::Standard,
            entry_detection_id: Some(entry_detection_id),
            exit_detection_id,
            site_id: None,
            vrm: None,
            entry_time: None,
            exit_time: None,
            entry_camera_id: None,
            exit_camera_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a through-traffic event; the exit reference is left empty
    pub fn through_traffic(detection_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            event_type: EventType::ThroughTraffic,
            entry_detection_id: Some(detection_id),
            exit_detection_id: None,
            site_id: None,
            vrm: None,
            entry_time: None,
            exit_time: None,
            entry_camera_id: None,
            exit_camera_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_event_type(mut self, event_type: impl Into<EventType>) -> Self {
        self.event_type = event_type.into();
        self
    }

    pub fn with_exit(mut self, exit_detection_id: Uuid) -> Self {
        self.exit_detection_id = Some(exit_detection_id);
        self
    }

    pub fn with_site(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    pub fn with_vrm(mut self, vrm: impl Into<String>) -> Self {
        self.vrm = Some(vrm.into());
        self
    }

    /// Minutes between entry and exit, when both times are known
    pub fn duration_minutes(&self) -> Option<f64> {
        let (entry, exit) = (self.entry_time?, self.exit_time?);
        Some((exit - entry).num_seconds() as f64 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_from_str() {
        assert_eq!(EventType::from("through_traffic"), EventType::ThroughTraffic);
        assert_eq!(EventType::from("standard"), EventType::Standard);
        assert_eq!(
            EventType::from("parking"),
            EventType::Other("parking".to_string())
        );
        // Tags are matched exactly
        assert_eq!(
            EventType::from("Through_Traffic"),
            EventType::Other("Through_Traffic".to_string())
        );
    }

    #[test]
    fn test_event_type_display_roundtrips_tag() {
        for tag in ["through_traffic", "standard", "overstay"] {
            assert_eq!(EventType::from(tag).to_string(), tag);
        }
    }

    #[test]
    fn test_event_type_serializes_as_plain_string() {
        let json = serde_json::to_value(EventType::ThroughTraffic).unwrap();
        assert_eq!(json, serde_json::json!("through_traffic"));

        let parsed: EventType = serde_json::from_value(serde_json::json!("overstay")).unwrap();
        assert_eq!(parsed, EventType::Other("overstay".to_string()));
    }

    #[test]
    fn test_through_traffic_constructor_leaves_exit_empty() {
        let detection_id = Uuid::now_v7();
        let event = Event::through_traffic(detection_id);

        assert!(event.event_type.is_through_traffic());
        assert_eq!(event.entry_detection_id, Some(detection_id));
        assert_eq!(event.exit_detection_id, None);
    }

    #[test]
    fn test_duration_minutes() {
        let mut event = Event::standard(Uuid::now_v7(), None).with_vrm("AB12CDE");
        assert_eq!(event.duration_minutes(), None);

        let entry = Utc::now();
        event.entry_time = Some(entry);
        event.exit_time = Some(entry + chrono::Duration::seconds(90 * 60 + 30));
        assert_eq!(event.duration_minutes(), Some(90.5));
    }

    #[test]
    fn test_event_serialization_skips_missing_exit() {
        let event = Event::standard(Uuid::now_v7(), None);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event_type"], "standard");
        assert!(json.get("exit_detection_id").is_none());
        assert!(json.get("vrm").is_none());

        let json = serde_json::to_value(event.with_site("carpark-7")).unwrap();
        assert_eq!(json["site_id"], "carpark-7");
    }
}
