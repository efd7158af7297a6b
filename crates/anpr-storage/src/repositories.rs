// Repository layer for database operations
// Point lookups for events and detections, plus inserts for loading fixtures

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create database connection from URL with a bounded pool
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Events
    // ============================================

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_type, entry_detection_id, exit_detection_id, site_id, vrm,
                   entry_time, exit_time, entry_camera_id, exit_camera_id, created_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_event(&self, input: CreateEvent) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (id, event_type, entry_detection_id, exit_detection_id, site_id,
                                vrm, entry_time, exit_time, entry_camera_id, exit_camera_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, event_type, entry_detection_id, exit_detection_id, site_id, vrm,
                      entry_time, exit_time, entry_camera_id, exit_camera_id, created_at
            "#,
        )
        .bind(input.id)
        .bind(input.event_type.as_str())
        .bind(input.entry_detection_id)
        .bind(input.exit_detection_id)
        .bind(&input.site_id)
        .bind(&input.vrm)
        .bind(input.entry_time)
        .bind(input.exit_time)
        .bind(&input.entry_camera_id)
        .bind(&input.exit_camera_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Detections
    // ============================================

    pub async fn get_detection(&self, id: Uuid) -> Result<Option<DetectionRow>> {
        let row = sqlx::query_as::<_, DetectionRow>(
            r#"
            SELECT id, image_path, vrm, camera_id, direction, confidence, country,
                   captured_at, created_at
            FROM detections
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn create_detection(&self, input: CreateDetection) -> Result<DetectionRow> {
        let row = sqlx::query_as::<_, DetectionRow>(
            r#"
            INSERT INTO detections (id, image_path, vrm, camera_id, direction, confidence,
                                    country, captured_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, image_path, vrm, camera_id, direction, confidence, country,
                      captured_at, created_at
            "#,
        )
        .bind(input.id)
        .bind(&input.image_path)
        .bind(&input.vrm)
        .bind(&input.camera_id)
        .bind(&input.direction)
        .bind(input.confidence)
        .bind(&input.country)
        .bind(input.captured_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }
}
