//! PostgreSQL news statistics repository implementation.

use crate::{traits::NewsStatsRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{NewsId, NewsStats, NewsroomResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// PostgreSQL news statistics repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = NewsStatsRepository)]
pub struct PgNewsStatsRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgNewsStatsRepository {
    /// Creates a new PostgreSQL news statistics repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NewsStatsRow {
    news_id: Uuid,
    total_likes: i64,
    total_dislikes: i64,
    last_calculated_at: DateTime<Utc>,
}

impl From<NewsStatsRow> for NewsStats {
    fn from(row: NewsStatsRow) -> Self {
        Self {
            news_id: NewsId::from_uuid(row.news_id),
            total_likes: u64::try_from(row.total_likes).unwrap_or_default(),
            total_dislikes: u64::try_from(row.total_dislikes).unwrap_or_default(),
            last_calculated_at: row.last_calculated_at,
        }
    }
}

fn to_column(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl NewsStatsRepository for PgNewsStatsRepository {
    async fn replace_all(&self, stats: &[NewsStats]) -> NewsroomResult<()> {
        debug!("Replacing news stats with {} rows", stats.len());

        let mut tx = self.pool.inner().begin().await?;

        sqlx::query("DELETE FROM news_stats").execute(&mut *tx).await?;

        for row in stats {
            sqlx::query(
                r#"
                INSERT INTO news_stats (news_id, total_likes, total_dislikes, last_calculated_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(row.news_id.into_inner())
            .bind(to_column(row.total_likes))
            .bind(to_column(row.total_dislikes))
            .bind(row.last_calculated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn find_by_news_id(&self, news_id: NewsId) -> NewsroomResult<Option<NewsStats>> {
        let row = sqlx::query_as::<_, NewsStatsRow>(
            "SELECT news_id, total_likes, total_dislikes, last_calculated_at FROM news_stats WHERE news_id = $1",
        )
        .bind(news_id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(NewsStats::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion() {
        let row = NewsStatsRow {
            news_id: Uuid::now_v7(),
            total_likes: 12,
            total_dislikes: 3,
            last_calculated_at: Utc::now(),
        };
        let stats = NewsStats::from(row);
        assert_eq!(stats.total_likes, 12);
        assert_eq!(stats.total_dislikes, 3);
    }

    #[test]
    fn test_column_conversion_saturates() {
        assert_eq!(to_column(u64::MAX), i64::MAX);
        assert_eq!(to_column(5), 5);
    }
}
