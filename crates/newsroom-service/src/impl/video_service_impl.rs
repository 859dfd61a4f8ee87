//! Video service implementation.

use crate::cache::{CacheSettings, CacheStore, Clock, CollectionCache, SystemClock};
use crate::dto::{CreateVideoRequest, UpdateVideoRequest, VideoListResponse, VideoResponse};
use crate::filters::VideoFilter;
use crate::video_service::VideoService;
use async_trait::async_trait;
use newsroom_core::{NewsroomError, NewsroomResult, ValidateExt, Video, VideoId};
use newsroom_repository::VideoRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Video service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = VideoService)]
pub struct VideoServiceComponent {
    #[shaku(inject)]
    video_repository: Arc<dyn VideoRepository>,
    #[shaku(inject)]
    cache_store: Arc<dyn CacheStore>,
    cache_settings: CacheSettings,
    #[shaku(default = Arc::new(SystemClock))]
    clock: Arc<dyn Clock>,
}

impl VideoServiceComponent {
    #[must_use]
    pub fn new(
        video_repository: Arc<dyn VideoRepository>,
        cache_store: Arc<dyn CacheStore>,
        cache_settings: CacheSettings,
    ) -> Self {
        Self {
            video_repository,
            cache_store,
            cache_settings,
            clock: Arc::new(SystemClock),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn collection(&self) -> CollectionCache<Video> {
        CollectionCache::with_clock(
            self.cache_store.clone(),
            &self.cache_settings,
            self.clock.clone(),
        )
    }

    async fn invalidate(&self) {
        let repository = self.video_repository.clone();
        self.collection()
            .invalidate_collection(move || async move { repository.list_active().await })
            .await;
    }
}

#[async_trait]
impl VideoService for VideoServiceComponent {
    async fn list_videos(&self, filter: VideoFilter) -> NewsroomResult<VideoListResponse> {
        debug!(
            "Listing videos, page: {}, size: {}",
            filter.page.page_number, filter.page.page_size
        );

        let repository = self.video_repository.clone();
        let page = self
            .collection()
            .get_collection(&filter, move || async move { repository.list_active().await })
            .await?;

        Ok(page.map(VideoResponse::from))
    }

    async fn get_video(&self, id: VideoId) -> NewsroomResult<VideoResponse> {
        debug!("Getting video: {}", id);

        self.video_repository
            .find_by_id(id)
            .await?
            .map(VideoResponse::from)
            .ok_or_else(|| NewsroomError::not_found("Video", id))
    }

    async fn create_video(&self, request: CreateVideoRequest) -> NewsroomResult<VideoResponse> {
        debug!("Creating video: {}", request.title);

        request.validate_request()?;

        let video = Video::new(
            request.author_id,
            request.title,
            request.description,
            request.video_path,
        );
        let saved = self.video_repository.save(&video).await?;
        self.invalidate().await;

        info!("Video created: {}", saved.id);
        Ok(VideoResponse::from(saved))
    }

    async fn update_video(
        &self,
        id: VideoId,
        request: UpdateVideoRequest,
    ) -> NewsroomResult<VideoResponse> {
        debug!("Updating video: {}", id);

        request.validate_request()?;

        let mut video = self
            .video_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| NewsroomError::not_found("Video", id))?;

        if let Some(title) = request.title {
            video.title = title;
        }
        if let Some(description) = request.description {
            video.description = description;
        }
        if let Some(video_path) = request.video_path {
            video.video_path = video_path;
        }
        video.touch();

        let updated = self.video_repository.update(&video).await?;
        self.invalidate().await;

        info!("Video updated: {}", id);
        Ok(VideoResponse::from(updated))
    }

    async fn delete_video(&self, id: VideoId) -> NewsroomResult<()> {
        debug!("Deleting video: {}", id);

        if !self.video_repository.soft_delete(id).await? {
            return Err(NewsroomError::not_found("Video", id));
        }
        self.invalidate().await;

        info!("Video deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for VideoServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoServiceComponent")
            .field("cache_settings", &self.cache_settings)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCacheStore, ManualClock};
    use chrono::{TimeDelta, Utc};
    use newsroom_core::UserId;
    use newsroom_repository::InMemoryVideoRepository;
    use std::time::Duration;

    fn create_request(title: &str) -> CreateVideoRequest {
        CreateVideoRequest {
            author_id: UserId::new(),
            title: title.to_string(),
            description: String::new(),
            video_path: format!("/media/{}.mp4", title.to_lowercase()),
        }
    }

    #[tokio::test]
    async fn test_get_deleted_video_is_not_found() {
        let service = VideoServiceComponent::new(
            Arc::new(InMemoryVideoRepository::new()),
            Arc::new(InMemoryCacheStore::new()),
            CacheSettings::default(),
        );
        let created = service.create_video(create_request("Launch")).await.unwrap();
        service.delete_video(created.id).await.unwrap();

        let result = service.get_video(created.id).await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
        assert_eq!(
            service.list_videos(VideoFilter::default()).await.unwrap().total_records,
            0
        );
    }

    #[tokio::test]
    async fn test_update_missing_video_is_not_found() {
        let service = VideoServiceComponent::new(
            Arc::new(InMemoryVideoRepository::new()),
            Arc::new(InMemoryCacheStore::new()),
            CacheSettings::default(),
        );
        let result = service
            .update_video(VideoId::new(), UpdateVideoRequest::default())
            .await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_expired_snapshot_is_reloaded() {
        let repository = Arc::new(InMemoryVideoRepository::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let settings = CacheSettings {
            ttl: Duration::from_secs(60),
            ..CacheSettings::default()
        };
        let store = Arc::new(InMemoryCacheStore::with_clock(clock.clone()));
        let service = VideoServiceComponent::new(repository.clone(), store, settings)
            .with_clock(clock.clone());

        service.list_videos(VideoFilter::default()).await.unwrap();

        // Written behind the service's back; invisible until the snapshot expires.
        repository
            .save(&Video::new(
                UserId::new(),
                "Backfill".to_string(),
                String::new(),
                "/media/backfill.mp4".to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(
            service.list_videos(VideoFilter::default()).await.unwrap().total_records,
            0
        );

        clock.advance(TimeDelta::seconds(61));
        assert_eq!(
            service.list_videos(VideoFilter::default()).await.unwrap().total_records,
            1
        );
    }
}
