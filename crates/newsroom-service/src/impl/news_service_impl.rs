//! News service implementation.

use crate::cache::{CacheSettings, CacheStore, Clock, CollectionCache, SystemClock};
use crate::dto::{CreateNewsRequest, NewsListResponse, NewsResponse, UpdateNewsRequest};
use crate::filters::NewsFilter;
use crate::news_service::NewsService;
use async_trait::async_trait;
use newsroom_core::{News, NewsId, NewsroomError, NewsroomResult, ValidateExt};
use newsroom_repository::NewsRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// News service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = NewsService)]
pub struct NewsServiceComponent {
    #[shaku(inject)]
    news_repository: Arc<dyn NewsRepository>,
    #[shaku(inject)]
    cache_store: Arc<dyn CacheStore>,
    cache_settings: CacheSettings,
    #[shaku(default = Arc::new(SystemClock))]
    clock: Arc<dyn Clock>,
}

impl NewsServiceComponent {
    /// Creates a news service outside of a DI module.
    #[must_use]
    pub fn new(
        news_repository: Arc<dyn NewsRepository>,
        cache_store: Arc<dyn CacheStore>,
        cache_settings: CacheSettings,
    ) -> Self {
        Self {
            news_repository,
            cache_store,
            cache_settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for cache expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn collection(&self) -> CollectionCache<News> {
        CollectionCache::with_clock(
            self.cache_store.clone(),
            &self.cache_settings,
            self.clock.clone(),
        )
    }

    async fn invalidate(&self) {
        let repository = self.news_repository.clone();
        self.collection()
            .invalidate_collection(move || async move { repository.list_active().await })
            .await;
    }

    async fn find_live(&self, id: NewsId) -> NewsroomResult<News> {
        self.news_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| NewsroomError::not_found("News", id))
    }
}

#[async_trait]
impl NewsService for NewsServiceComponent {
    async fn list_news(&self, filter: NewsFilter) -> NewsroomResult<NewsListResponse> {
        debug!(
            "Listing news, page: {}, size: {}",
            filter.page.page_number, filter.page.page_size
        );

        let repository = self.news_repository.clone();
        let page = self
            .collection()
            .get_collection(&filter, move || async move { repository.list_active().await })
            .await?;

        Ok(page.map(NewsResponse::from))
    }

    async fn get_news(&self, id: NewsId) -> NewsroomResult<NewsResponse> {
        debug!("Getting news: {}", id);

        let news = self.find_live(id).await?;
        Ok(NewsResponse::from(news))
    }

    async fn create_news(&self, request: CreateNewsRequest) -> NewsroomResult<NewsResponse> {
        debug!("Creating news: {}", request.title);

        request.validate_request()?;

        let news = News::new(
            request.author_id,
            request.title,
            request.content,
            request.category,
            request.tags,
        );
        let saved = self.news_repository.save(&news).await?;
        self.invalidate().await;

        info!("News created: {}", saved.id);
        Ok(NewsResponse::from(saved))
    }

    async fn update_news(&self, id: NewsId, request: UpdateNewsRequest) -> NewsroomResult<NewsResponse> {
        debug!("Updating news: {}", id);

        request.validate_request()?;

        let mut news = self.find_live(id).await?;
        if let Some(title) = request.title {
            news.title = title;
        }
        if let Some(content) = request.content {
            news.content = content;
        }
        if let Some(category) = request.category {
            news.category = category;
        }
        if let Some(tags) = request.tags {
            news.tags = tags;
        }
        news.touch();

        let updated = self.news_repository.update(&news).await?;
        self.invalidate().await;

        info!("News updated: {}", id);
        Ok(NewsResponse::from(updated))
    }

    async fn delete_news(&self, id: NewsId) -> NewsroomResult<()> {
        debug!("Deleting news: {}", id);

        if !self.news_repository.soft_delete(id).await? {
            return Err(NewsroomError::not_found("News", id));
        }
        self.invalidate().await;

        info!("News deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for NewsServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsServiceComponent")
            .field("cache_settings", &self.cache_settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheStore;
    use mockall::mock;
    use newsroom_core::{Category, PageRequest, UserId};
    use newsroom_repository::InMemoryNewsRepository;

    mock! {
        pub NewsRepo {}

        #[async_trait]
        impl NewsRepository for NewsRepo {
            async fn list_active(&self) -> NewsroomResult<Vec<News>>;
            async fn find_by_id(&self, id: NewsId) -> NewsroomResult<Option<News>>;
            async fn save(&self, news: &News) -> NewsroomResult<News>;
            async fn update(&self, news: &News) -> NewsroomResult<News>;
            async fn soft_delete(&self, id: NewsId) -> NewsroomResult<bool>;
        }
    }

    fn create_request(title: &str, category: Category) -> CreateNewsRequest {
        CreateNewsRequest {
            author_id: UserId::new(),
            title: title.to_string(),
            content: "body".to_string(),
            category,
            tags: Vec::new(),
        }
    }

    fn service() -> (NewsServiceComponent, Arc<InMemoryCacheStore>) {
        let store = Arc::new(InMemoryCacheStore::new());
        let service = NewsServiceComponent::new(
            Arc::new(InMemoryNewsRepository::new()),
            store.clone(),
            CacheSettings::default(),
        );
        (service, store)
    }

    #[tokio::test]
    async fn test_create_then_list_reflects_write() {
        let (service, _) = service();
        assert_eq!(service.list_news(NewsFilter::default()).await.unwrap().total_records, 0);

        service
            .create_news(create_request("Polls close", Category::Politics))
            .await
            .unwrap();

        let page = service.list_news(NewsFilter::default()).await.unwrap();
        assert_eq!(page.total_records, 1);
        assert_eq!(page.items[0].title, "Polls close");
    }

    #[tokio::test]
    async fn test_update_changes_cached_list() {
        let (service, _) = service();
        let created = service
            .create_news(create_request("Draft", Category::Culture))
            .await
            .unwrap();
        service.list_news(NewsFilter::default()).await.unwrap();

        service
            .update_news(
                created.id,
                UpdateNewsRequest {
                    title: Some("Final".to_string()),
                    ..UpdateNewsRequest::default()
                },
            )
            .await
            .unwrap();

        let page = service.list_news(NewsFilter::default()).await.unwrap();
        assert_eq!(page.items[0].title, "Final");
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found_and_keeps_cache() {
        let (service, store) = service();
        service
            .create_news(create_request("Kept", Category::World))
            .await
            .unwrap();
        service.list_news(NewsFilter::default()).await.unwrap();
        assert!(!store.is_empty());

        let result = service.delete_news(NewsId::new()).await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
        assert!(!store.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_write() {
        let (service, _) = service();
        let result = service
            .create_news(create_request("   ", Category::World))
            .await;
        assert!(matches!(result, Err(NewsroomError::Validation(_))));
    }

    #[tokio::test]
    async fn test_repository_failure_propagates_on_miss() {
        let mut repository = MockNewsRepo::new();
        repository
            .expect_list_active()
            .times(1)
            .returning(|| Err(NewsroomError::Database("connection refused".to_string())));

        let service = NewsServiceComponent::new(
            Arc::new(repository),
            Arc::new(InMemoryCacheStore::new()),
            CacheSettings::default(),
        );

        let result = service
            .list_news(NewsFilter {
                page: PageRequest::first(),
                ..NewsFilter::default()
            })
            .await;
        assert!(matches!(result, Err(NewsroomError::Database(_))));
    }

    #[tokio::test]
    async fn test_failed_write_does_not_invalidate() {
        let mut repository = MockNewsRepo::new();
        repository
            .expect_soft_delete()
            .returning(|_| Err(NewsroomError::Database("deadlock".to_string())));
        repository.expect_list_active().never();

        let store = Arc::new(InMemoryCacheStore::new());
        store
            .set(
                "newsroom:cache:news",
                b"sentinel",
                chrono::Utc::now() + chrono::TimeDelta::seconds(60),
            )
            .await
            .unwrap();

        let service = NewsServiceComponent::new(
            Arc::new(repository),
            store.clone(),
            CacheSettings::default(),
        );

        assert!(service.delete_news(NewsId::new()).await.is_err());
        assert_eq!(
            store.get("newsroom:cache:news").await.unwrap(),
            Some(b"sentinel".to_vec())
        );
    }
}
