// ANPR event image API server
// Decision: Image lookups never fail over HTTP; missing data is reported as null paths

mod config;
mod events;

use anpr_core::EventImageResolver;
use anpr_storage::{create_db_detection_store, create_db_event_store, Database};
use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ApiConfig;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(events::get_event_images),
    components(schemas(events::EventImagesResponse)),
    tags(
        (name = "events", description = "Event image lookup endpoints")
    ),
    info(
        title = "ANPR Events API",
        version = "0.1.0",
        description = "API for resolving the entry and exit images of vehicle events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "anpr_api=debug,anpr_storage=info,anpr_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("anpr-api starting...");

    let config = ApiConfig::from_env()?;

    // Initialize database
    let db = Database::connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.max_connections,
        "Connected to database"
    );

    if config.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
        tracing::info!("Database migrations applied");
    }

    let resolver = EventImageResolver::new(
        Arc::new(create_db_event_store(db.clone())),
        Arc::new(create_db_detection_store(db)),
    );
    let events_state = events::AppState::new(resolver);

    if !config.api_prefix.is_empty() {
        tracing::info!(prefix = %config.api_prefix, "API prefix configured");
    }

    let app = build_app(events::routes(events_state), &config.api_prefix);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Assemble health, docs and the (optionally prefixed) API routes
fn build_app(api_routes: Router, api_prefix: &str) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(build_router_with_prefix(api_routes, api_prefix))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Build router with optional API prefix (extracted for testing)
fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anpr_core::{Detection, Event, InMemoryDetectionStore, InMemoryEventStore};
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_routes() -> Router {
        Router::new().route("/v1/test", get(|| async { "ok" }))
    }

    fn request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_api_prefix_empty() {
        let app = build_router_with_prefix(test_routes(), "");

        let response = app.oneshot(request("/v1/test")).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_api_prefix_set() {
        let app = build_router_with_prefix(test_routes(), "/api");

        // Route should work with prefix
        let response = app.clone().oneshot(request("/api/v1/test")).await.unwrap();
        assert_eq!(response.status(), 200);

        // Route should NOT work without prefix
        let response = app.oneshot(request("/v1/test")).await.unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_app(test_routes(), "");

        let response = app.oneshot(request("/health")).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_openapi_lists_images_route() {
        let app = build_app(test_routes(), "");

        let response = app.oneshot(request("/api-doc/openapi.json")).await.unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["paths"]["/v1/events/{event_id}/images"].is_object());
    }

    #[tokio::test]
    async fn test_prefixed_event_images() {
        let event_store = InMemoryEventStore::new();
        let detection_store = InMemoryDetectionStore::new();
        let entry = Detection::new("/img/in.jpg");
        let event = Event::standard(entry.id, None);
        let event_id = event.id;
        detection_store.add_detection(entry).await;
        event_store.add_event(event).await;

        let resolver = EventImageResolver::new(Arc::new(event_store), Arc::new(detection_store));
        let app = build_app(events::routes(events::AppState::new(resolver)), "/api");

        let response = app
            .oneshot(request(&format!("/api/v1/events/{}/images", event_id)))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["entry_image_path"], "/img/in.jpg");
        assert!(json["exit_image_path"].is_null());
    }
}
