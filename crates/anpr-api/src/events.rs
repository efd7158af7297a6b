// Event image HTTP routes

use anpr_core::{EventImageResolver, EventImages};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Entry and exit image paths for an event.
/// A path is null when it could not be determined.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventImagesResponse {
    /// The requested event ID.
    pub event_id: Uuid,
    /// Image captured when the vehicle entered.
    #[schema(example = "/img/d3.jpg")]
    pub entry_image_path: Option<String>,
    /// Image captured when the vehicle left. Equal to the entry image for
    /// through-traffic events.
    #[schema(example = "/img/d4.jpg")]
    pub exit_image_path: Option<String>,
}

impl EventImagesResponse {
    fn new(event_id: Uuid, images: EventImages) -> Self {
        let (entry_image_path, exit_image_path) = images.into_pair();
        Self {
            event_id,
            entry_image_path,
            exit_image_path,
        }
    }
}

/// App state for event routes
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<EventImageResolver>,
}

impl AppState {
    pub fn new(resolver: EventImageResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/v1/events/:event_id/images", get(get_event_images))
        .with_state(state)
}

/// GET /v1/events/{event_id}/images - Get entry and exit images
#[utoipa::path(
    get,
    path = "/v1/events/{event_id}/images",
    params(
        ("event_id" = Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Image paths, null where unavailable", body = EventImagesResponse),
        (status = 400, description = "Malformed event ID")
    ),
    tag = "events"
)]
pub async fn get_event_images(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Json<EventImagesResponse> {
    let images = state.resolver.resolve(event_id).await;
    Json(EventImagesResponse::new(event_id, images))
}
