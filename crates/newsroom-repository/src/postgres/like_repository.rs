//! PostgreSQL like repository implementation.

use crate::{traits::LikeRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{
    ContentTarget, Like, LikeId, LikeKind, LikeTally, NewsId, NewsroomError, NewsroomResult,
    UserId,
};
use shaku::Component;
use sqlx::FromRow;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const LIKE_COLUMNS: &str = "id, user_id, target_type, target_id, kind, created_at";

/// PostgreSQL like repository implementation.
///
/// `(user_id, target_type, target_id)` is unique, so a repeated like fails
/// with a unique violation and surfaces as `Conflict`.
#[derive(Component, Clone)]
#[shaku(interface = LikeRepository)]
pub struct PgLikeRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgLikeRepository {
    /// Creates a new PostgreSQL like repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LikeRow {
    id: Uuid,
    user_id: Uuid,
    target_type: String,
    target_id: Uuid,
    kind: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<LikeRow> for Like {
    type Error = NewsroomError;

    fn try_from(row: LikeRow) -> Result<Self, Self::Error> {
        let target = ContentTarget::from_parts(&row.target_type, row.target_id)
            .map_err(|e| NewsroomError::Internal(format!("Invalid like target in database: {}", e)))?;
        let kind = row
            .kind
            .parse::<LikeKind>()
            .map_err(|e| NewsroomError::Internal(format!("Invalid like kind in database: {}", e)))?;

        Ok(Like {
            id: LikeId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            target,
            kind,
            created_at: row.created_at,
        })
    }
}

fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn list_for(&self, target: ContentTarget) -> NewsroomResult<Vec<Like>> {
        debug!("Loading likes for {}", target);

        let rows = sqlx::query_as::<_, LikeRow>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE target_type = $1 AND target_id = $2 ORDER BY created_at, id"
        ))
        .bind(target.kind())
        .bind(target.id())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Like::try_from).collect()
    }

    async fn find(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<Option<Like>> {
        let row = sqlx::query_as::<_, LikeRow>(&format!(
            "SELECT {LIKE_COLUMNS} FROM likes WHERE user_id = $1 AND target_type = $2 AND target_id = $3"
        ))
        .bind(user_id.into_inner())
        .bind(target.kind())
        .bind(target.id())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Like::try_from).transpose()
    }

    async fn save(&self, like: &Like) -> NewsroomResult<Like> {
        debug!("Saving like {} on {}", like.id, like.target);

        let row = sqlx::query_as::<_, LikeRow>(&format!(
            r#"
            INSERT INTO likes (id, user_id, target_type, target_id, kind, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LIKE_COLUMNS}
            "#
        ))
        .bind(like.id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.target.kind())
        .bind(like.target.id())
        .bind(like.kind.as_str())
        .bind(like.created_at)
        .fetch_one(self.pool.inner())
        .await?;

        Like::try_from(row)
    }

    async fn delete(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<bool> {
        debug!("Removing like of {} on {}", user_id, target);

        let result = sqlx::query(
            "DELETE FROM likes WHERE user_id = $1 AND target_type = $2 AND target_id = $3",
        )
        .bind(user_id.into_inner())
        .bind(target.kind())
        .bind(target.id())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn tally_news(&self) -> NewsroomResult<HashMap<NewsId, LikeTally>> {
        let rows = sqlx::query_as::<_, (Uuid, i64, i64)>(
            r#"
            SELECT target_id,
                   COUNT(*) FILTER (WHERE kind = 'like'),
                   COUNT(*) FILTER (WHERE kind = 'dislike')
            FROM likes
            WHERE target_type = 'news'
            GROUP BY target_id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, likes, dislikes)| {
                (
                    NewsId::from_uuid(id),
                    LikeTally {
                        likes: count(likes),
                        dislikes: count(dislikes),
                    },
                )
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(target_type: &str, kind: &str) -> LikeRow {
        LikeRow {
            id: Uuid::now_v7(),
            user_id: Uuid::now_v7(),
            target_type: target_type.to_string(),
            target_id: Uuid::now_v7(),
            kind: kind.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let like = Like::try_from(row("news", "dislike")).unwrap();
        assert_eq!(like.kind, LikeKind::Dislike);
        assert!(matches!(like.target, ContentTarget::News(_)));
    }

    #[test]
    fn test_row_with_unknown_values_is_rejected() {
        assert!(Like::try_from(row("podcast", "like")).is_err());
        assert!(Like::try_from(row("video", "love")).is_err());
    }

    #[test]
    fn test_negative_count_clamps_to_zero() {
        assert_eq!(count(-1), 0);
        assert_eq!(count(7), 7);
    }
}
