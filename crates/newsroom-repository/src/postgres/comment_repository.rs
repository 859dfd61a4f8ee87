//! PostgreSQL comment repository implementation.

use crate::{traits::CommentRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{
    Comment, CommentId, ContentTarget, NewsId, NewsroomError, NewsroomResult, UserId, VideoId,
};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const COMMENT_COLUMNS: &str =
    "id, user_id, news_id, video_id, text, reply, is_deleted, created_at, updated_at";

/// PostgreSQL comment repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CommentRepository)]
pub struct PgCommentRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCommentRepository {
    /// Creates a new PostgreSQL comment repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    news_id: Option<Uuid>,
    video_id: Option<Uuid>,
    text: String,
    reply: Option<String>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = NewsroomError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        let target = ContentTarget::from_options(
            row.news_id.map(NewsId::from_uuid),
            row.video_id.map(VideoId::from_uuid),
        )
        .map_err(|e| NewsroomError::Internal(format!("Invalid comment {} in database: {}", row.id, e)))?;

        Ok(Comment {
            id: CommentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            target,
            text: row.text,
            reply: row.reply,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn list_active(&self, target: Option<ContentTarget>) -> NewsroomResult<Vec<Comment>> {
        debug!("Loading live comments for {:?}", target);

        let rows = match target {
            None => {
                sqlx::query_as::<_, CommentRow>(&format!(
                    "SELECT {COMMENT_COLUMNS} FROM comments WHERE is_deleted = FALSE ORDER BY created_at, id"
                ))
                .fetch_all(self.pool.inner())
                .await?
            }
            Some(target) => {
                sqlx::query_as::<_, CommentRow>(&format!(
                    r#"
                    SELECT {COMMENT_COLUMNS} FROM comments
                    WHERE is_deleted = FALSE AND news_id IS NOT DISTINCT FROM $1
                      AND video_id IS NOT DISTINCT FROM $2
                    ORDER BY created_at, id
                    "#
                ))
                .bind(target.news_id().map(NewsId::into_inner))
                .bind(target.video_id().map(VideoId::into_inner))
                .fetch_all(self.pool.inner())
                .await?
            }
        };

        rows.into_iter().map(Comment::try_from).collect()
    }

    async fn find_by_id(&self, id: CommentId) -> NewsroomResult<Option<Comment>> {
        debug!("Finding comment by id: {}", id);

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Comment::try_from).transpose()
    }

    async fn save(&self, comment: &Comment) -> NewsroomResult<Comment> {
        debug!("Saving comment: {}", comment.id);

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            INSERT INTO comments (id, user_id, news_id, video_id, text, reply, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment.id.into_inner())
        .bind(comment.user_id.into_inner())
        .bind(comment.target.news_id().map(NewsId::into_inner))
        .bind(comment.target.video_id().map(VideoId::into_inner))
        .bind(&comment.text)
        .bind(&comment.reply)
        .bind(comment.is_deleted)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        Comment::try_from(row)
    }

    async fn update(&self, comment: &Comment) -> NewsroomResult<Comment> {
        debug!("Updating comment: {}", comment.id);

        let row = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            UPDATE comments
            SET text = $2, reply = $3, updated_at = $4
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment.id.into_inner())
        .bind(&comment.text)
        .bind(&comment.reply)
        .bind(comment.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Comment::try_from)
            .transpose()?
            .ok_or_else(|| NewsroomError::not_found("Comment", comment.id))
    }

    async fn soft_delete(&self, id: CommentId) -> NewsroomResult<bool> {
        debug!("Soft-deleting comment: {}", id);

        let result = sqlx::query(
            "UPDATE comments SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
