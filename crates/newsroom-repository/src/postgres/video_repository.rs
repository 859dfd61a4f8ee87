//! PostgreSQL video repository implementation.

use crate::{traits::VideoRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{NewsroomError, NewsroomResult, UserId, Video, VideoId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const VIDEO_COLUMNS: &str =
    "id, author_id, title, description, video_path, is_deleted, created_at, updated_at";

/// PostgreSQL video repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = VideoRepository)]
pub struct PgVideoRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgVideoRepository {
    /// Creates a new PostgreSQL video repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct VideoRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    description: String,
    video_path: String,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<VideoRow> for Video {
    fn from(row: VideoRow) -> Self {
        Video {
            id: VideoId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            title: row.title,
            description: row.description,
            video_path: row.video_path,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<Video>> {
        debug!("Loading all live videos");

        let rows = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE is_deleted = FALSE ORDER BY created_at, id"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Video::from).collect())
    }

    async fn find_by_id(&self, id: VideoId) -> NewsroomResult<Option<Video>> {
        debug!("Finding video by id: {}", id);

        let row = sqlx::query_as::<_, VideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Video::from))
    }

    async fn save(&self, video: &Video) -> NewsroomResult<Video> {
        debug!("Saving video: {}", video.id);

        let row = sqlx::query_as::<_, VideoRow>(&format!(
            r#"
            INSERT INTO videos (id, author_id, title, description, video_path, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(video.id.into_inner())
        .bind(video.author_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_path)
        .bind(video.is_deleted)
        .bind(video.created_at)
        .bind(video.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Video::from(row))
    }

    async fn update(&self, video: &Video) -> NewsroomResult<Video> {
        debug!("Updating video: {}", video.id);

        let row = sqlx::query_as::<_, VideoRow>(&format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, video_path = $4, updated_at = $5
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(video.id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_path)
        .bind(video.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Video::from)
            .ok_or_else(|| NewsroomError::not_found("Video", video.id))
    }

    async fn soft_delete(&self, id: VideoId) -> NewsroomResult<bool> {
        debug!("Soft-deleting video: {}", id);

        let result = sqlx::query(
            "UPDATE videos SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
