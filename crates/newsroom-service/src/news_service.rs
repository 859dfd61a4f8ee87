//! News service trait definition.

use crate::dto::{CreateNewsRequest, NewsListResponse, NewsResponse, UpdateNewsRequest};
use crate::filters::NewsFilter;
use async_trait::async_trait;
use newsroom_core::{Interface, NewsId, NewsroomResult};

/// News service trait.
#[async_trait]
pub trait NewsService: Interface + Send + Sync {
    /// Lists live articles matching the filter, served through the cache.
    async fn list_news(&self, filter: NewsFilter) -> NewsroomResult<NewsListResponse>;

    /// Gets a live article by ID.
    async fn get_news(&self, id: NewsId) -> NewsroomResult<NewsResponse>;

    /// Publishes a new article.
    async fn create_news(&self, request: CreateNewsRequest) -> NewsroomResult<NewsResponse>;

    /// Edits an article.
    async fn update_news(&self, id: NewsId, request: UpdateNewsRequest) -> NewsroomResult<NewsResponse>;

    /// Soft-deletes an article.
    async fn delete_news(&self, id: NewsId) -> NewsroomResult<()>;
}
