use chrono::Utc;
use sqlx::{PgPool, Postgres};
use tubely_core::{AppError, AssetClass, VideoRecord};
use uuid::Uuid;

/// Video record store used by the ingest pipeline
///
/// This abstracts the database implementation (PostgreSQL or in-memory)
#[async_trait::async_trait]
pub trait VideoRepository: Send + Sync {
    /// Fetch a record by ID. Fails with `RecordNotFound` when it does not exist.
    async fn get_video(&self, video_id: Uuid) -> Result<VideoRecord, AppError>;

    /// Link `location` to the record for one asset class and return the updated record.
    ///
    /// Only that class's location column changes, so concurrent uploads of the other class
    /// are never overwritten. Fails with `RecordNotFound` when the record does not exist.
    async fn set_asset_location(
        &self,
        video_id: Uuid,
        asset_class: AssetClass,
        location: &str,
    ) -> Result<VideoRecord, AppError>;
}

#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select_one"))]
    async fn get_video(&self, video_id: Uuid) -> Result<VideoRecord, AppError> {
        sqlx::query_as::<Postgres, VideoRecord>(
            r#"
            SELECT id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::RecordNotFound(format!("Video {} not found", video_id)))
    }

    #[tracing::instrument(
        skip(self, location),
        fields(db.table = "videos", db.operation = "update", asset_class = %asset_class)
    )]
    async fn set_asset_location(
        &self,
        video_id: Uuid,
        asset_class: AssetClass,
        location: &str,
    ) -> Result<VideoRecord, AppError> {
        let query = match asset_class {
            AssetClass::Thumbnail => {
                r#"
                UPDATE videos
                SET thumbnail_url = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
                "#
            }
            AssetClass::Video => {
                r#"
                UPDATE videos
                SET video_url = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at
                "#
            }
        };

        sqlx::query_as::<Postgres, VideoRecord>(query)
            .bind(video_id)
            .bind(location)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::RecordNotFound(format!("Video {} not found", video_id)))
    }
}
