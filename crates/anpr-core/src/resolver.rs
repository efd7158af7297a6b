// Event image resolution
//
// Walks Event -> entry Detection -> (exit Detection) and returns the image
// paths captured at each end. Read-only, stateless, at most three lookups.
//
// Every failure collapses into one of three shapes for the caller:
// (None, None), (Some, None), (Some, Some). The tagged ImageOutcome keeps
// the actual cause available for logging and tests.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::StoreError;
use crate::traits::{DetectionStore, EventStore};

/// Image paths for an event's entry and exit captures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventImages {
    pub entry: Option<String>,
    pub exit: Option<String>,
}

impl EventImages {
    pub fn new(entry: Option<String>, exit: Option<String>) -> Self {
        Self { entry, exit }
    }

    /// Neither image could be determined
    pub fn is_empty(&self) -> bool {
        self.entry.is_none() && self.exit.is_none()
    }

    /// Both images are known
    pub fn is_complete(&self) -> bool {
        self.entry.is_some() && self.exit.is_some()
    }

    pub fn into_pair(self) -> (Option<String>, Option<String>) {
        (self.entry, self.exit)
    }
}

/// What happened while resolving an event's images
#[derive(Debug, Clone)]
pub enum ImageOutcome {
    /// Entry and exit detections both resolved
    Complete { entry: String, exit: String },
    /// Through-traffic event; the entry capture stands in for the exit
    ThroughTraffic { image: String },
    /// Entry resolved, exit reference missing or dangling
    ExitMissing { entry: String },
    /// No event with the requested id
    EventNotFound,
    /// Event exists but its entry reference is missing or dangling.
    ///
    /// Unlike a missing exit this yields no partial result.
    EntryDetectionMissing,
    /// A lookup failed for a reason other than absence
    Failed(StoreError),
}

impl ImageOutcome {
    /// Collapse the outcome into the caller-facing pair
    pub fn images(&self) -> EventImages {
        match self {
            ImageOutcome::Complete { entry, exit } => {
                EventImages::new(Some(entry.clone()), Some(exit.clone()))
            }
            ImageOutcome::ThroughTraffic { image } => {
                EventImages::new(Some(image.clone()), Some(image.clone()))
            }
            ImageOutcome::ExitMissing { entry } => EventImages::new(Some(entry.clone()), None),
            ImageOutcome::EventNotFound
            | ImageOutcome::EntryDetectionMissing
            | ImageOutcome::Failed(_) => EventImages::default(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ImageOutcome::Failed(_))
    }
}

impl From<ImageOutcome> for EventImages {
    fn from(outcome: ImageOutcome) -> Self {
        outcome.images()
    }
}

/// Resolves the entry/exit image paths of an event
///
/// Holds shared handles to the two stores; cloning is cheap and concurrent
/// calls need no coordination.
#[derive(Clone)]
pub struct EventImageResolver {
    events: Arc<dyn EventStore>,
    detections: Arc<dyn DetectionStore>,
}

impl EventImageResolver {
    pub fn new(events: Arc<dyn EventStore>, detections: Arc<dyn DetectionStore>) -> Self {
        Self { events, detections }
    }

    /// Resolve the images for `event_id`. Never fails.
    ///
    /// Store failures are logged and reported as `(None, None)`, the same as
    /// an unknown event.
    pub async fn resolve(&self, event_id: Uuid) -> EventImages {
        let outcome = self.inspect(event_id).await;

        match &outcome {
            ImageOutcome::Failed(err) => {
                tracing::error!(
                    event_id = %event_id,
                    kind = err.kind(),
                    "Error getting event images: {}",
                    err
                );
            }
            ImageOutcome::EventNotFound => {
                tracing::debug!(event_id = %event_id, "Event not found");
            }
            ImageOutcome::EntryDetectionMissing => {
                tracing::debug!(event_id = %event_id, "Entry detection not found");
            }
            ImageOutcome::ExitMissing { .. } => {
                tracing::debug!(event_id = %event_id, "Exit detection not found");
            }
            ImageOutcome::Complete { .. } | ImageOutcome::ThroughTraffic { .. } => {}
        }

        outcome.into()
    }

    /// Resolve the images for `event_id`, keeping the reason for any gap
    pub async fn inspect(&self, event_id: Uuid) -> ImageOutcome {
        match self.lookup(event_id).await {
            Ok(outcome) => outcome,
            Err(err) => ImageOutcome::Failed(err),
        }
    }

    async fn lookup(&self, event_id: Uuid) -> Result<ImageOutcome, StoreError> {
        let Some(event) = self.events.get_event(event_id).await? else {
            return Ok(ImageOutcome::EventNotFound);
        };

        let entry = match event.entry_detection_id {
            Some(id) => self.detections.get_detection(id).await?,
            None => None,
        };
        let Some(entry) = entry else {
            return Ok(ImageOutcome::EntryDetectionMissing);
        };

        // The exit reference is never consulted for through traffic
        if event.event_type.is_through_traffic() {
            return Ok(ImageOutcome::ThroughTraffic {
                image: entry.image_path,
            });
        }

        let exit = match event.exit_detection_id {
            Some(id) => self.detections.get_detection(id).await?,
            None => None,
        };

        Ok(match exit {
            Some(exit) => ImageOutcome::Complete {
                entry: entry.image_path,
                exit: exit.image_path,
            },
            None => ImageOutcome::ExitMissing {
                entry: entry.image_path,
            },
        })
    }
}
