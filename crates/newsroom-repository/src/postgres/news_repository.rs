//! PostgreSQL news repository implementation.

use crate::{traits::NewsRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{Category, News, NewsId, NewsroomError, NewsroomResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const NEWS_COLUMNS: &str =
    "id, author_id, title, content, category, tags, is_deleted, created_at, updated_at";

/// PostgreSQL news repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = NewsRepository)]
pub struct PgNewsRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgNewsRepository {
    /// Creates a new PostgreSQL news repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an article.
#[derive(Debug, FromRow)]
struct NewsRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    content: String,
    category: String,
    tags: Vec<String>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NewsRow> for News {
    type Error = NewsroomError;

    fn try_from(row: NewsRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| NewsroomError::Internal(format!("Invalid category in database: {}", e)))?;

        Ok(News {
            id: NewsId::from_uuid(row.id),
            author_id: UserId::from_uuid(row.author_id),
            title: row.title,
            content: row.content,
            category,
            tags: row.tags,
            is_deleted: row.is_deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<News>> {
        debug!("Loading all live news");

        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE is_deleted = FALSE ORDER BY created_at, id"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(News::try_from).collect()
    }

    async fn find_by_id(&self, id: NewsId) -> NewsroomResult<Option<News>> {
        debug!("Finding news by id: {}", id);

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(News::try_from).transpose()
    }

    async fn save(&self, news: &News) -> NewsroomResult<News> {
        debug!("Saving news: {}", news.id);

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            r#"
            INSERT INTO news (id, author_id, title, content, category, tags, is_deleted, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(news.id.into_inner())
        .bind(news.author_id.into_inner())
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.category.as_str())
        .bind(&news.tags)
        .bind(news.is_deleted)
        .bind(news.created_at)
        .bind(news.updated_at)
        .fetch_one(self.pool.inner())
        .await?;

        News::try_from(row)
    }

    async fn update(&self, news: &News) -> NewsroomResult<News> {
        debug!("Updating news: {}", news.id);

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            r#"
            UPDATE news
            SET title = $2, content = $3, category = $4, tags = $5, updated_at = $6
            WHERE id = $1 AND is_deleted = FALSE
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(news.id.into_inner())
        .bind(&news.title)
        .bind(&news.content)
        .bind(news.category.as_str())
        .bind(&news.tags)
        .bind(news.updated_at)
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(News::try_from)
            .transpose()?
            .ok_or_else(|| NewsroomError::not_found("News", news.id))
    }

    async fn soft_delete(&self, id: NewsId) -> NewsroomResult<bool> {
        debug!("Soft-deleting news: {}", id);

        let result = sqlx::query(
            "UPDATE news SET is_deleted = TRUE, updated_at = NOW() WHERE id = $1 AND is_deleted = FALSE",
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
