//! Like service implementation.

use super::content_lookup::ensure_live;
use crate::dto::{AddLikeRequest, LikeResponse, NewsStatsResponse};
use crate::like_service::LikeService;
use async_trait::async_trait;
use chrono::Utc;
use newsroom_core::{
    ContentTarget, Like, NewsId, NewsStats, NewsroomError, NewsroomResult, UserId,
};
use newsroom_repository::{LikeRepository, NewsRepository, NewsStatsRepository, VideoRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Like service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = LikeService)]
pub struct LikeServiceComponent {
    #[shaku(inject)]
    like_repository: Arc<dyn LikeRepository>,
    #[shaku(inject)]
    news_stats_repository: Arc<dyn NewsStatsRepository>,
    #[shaku(inject)]
    news_repository: Arc<dyn NewsRepository>,
    #[shaku(inject)]
    video_repository: Arc<dyn VideoRepository>,
}

impl LikeServiceComponent {
    /// Creates a like service outside of a DI module.
    #[must_use]
    pub fn new(
        like_repository: Arc<dyn LikeRepository>,
        news_stats_repository: Arc<dyn NewsStatsRepository>,
        news_repository: Arc<dyn NewsRepository>,
        video_repository: Arc<dyn VideoRepository>,
    ) -> Self {
        Self {
            like_repository,
            news_stats_repository,
            news_repository,
            video_repository,
        }
    }

    async fn ensure_target(&self, target: ContentTarget) -> NewsroomResult<()> {
        ensure_live(
            self.news_repository.as_ref(),
            self.video_repository.as_ref(),
            target,
        )
        .await
    }
}

#[async_trait]
impl LikeService for LikeServiceComponent {
    async fn add_like(&self, target: ContentTarget, request: AddLikeRequest) -> NewsroomResult<LikeResponse> {
        debug!("User {} reacting to {} with {}", request.user_id, target, request.kind);

        self.ensure_target(target).await?;

        if self.like_repository.find(request.user_id, target).await?.is_some() {
            return Err(NewsroomError::conflict(format!(
                "User {} already reacted to {}",
                request.user_id, target
            )));
        }

        let like = Like::new(request.user_id, target, request.kind);
        let saved = self.like_repository.save(&like).await?;

        info!("Like added: {} on {}", saved.id, target);
        Ok(LikeResponse::from(saved))
    }

    async fn list_likes(&self, target: ContentTarget) -> NewsroomResult<Vec<LikeResponse>> {
        debug!("Listing likes on {}", target);

        self.ensure_target(target).await?;

        let likes = self.like_repository.list_for(target).await?;
        Ok(likes.into_iter().map(LikeResponse::from).collect())
    }

    async fn remove_like(&self, target: ContentTarget, user_id: UserId) -> NewsroomResult<()> {
        debug!("User {} withdrawing reaction to {}", user_id, target);

        if !self.like_repository.delete(user_id, target).await? {
            return Err(NewsroomError::not_found("Like", format!("{}:{}", user_id, target)));
        }

        info!("Like removed: user {} on {}", user_id, target);
        Ok(())
    }

    async fn news_stats(&self, news_id: NewsId) -> NewsroomResult<NewsStatsResponse> {
        debug!("Getting stats for news: {}", news_id);

        self.ensure_target(ContentTarget::News(news_id)).await?;

        self.news_stats_repository
            .find_by_news_id(news_id)
            .await?
            .map(NewsStatsResponse::from)
            .ok_or_else(|| NewsroomError::not_found("NewsStats", news_id))
    }

    async fn recalculate_news_stats(&self) -> NewsroomResult<usize> {
        let articles = self.news_repository.list_active().await?;
        let tallies = self.like_repository.tally_news().await?;
        let now = Utc::now();

        let stats: Vec<NewsStats> = articles
            .iter()
            .map(|news| {
                let tally = tallies.get(&news.id).copied().unwrap_or_default();
                NewsStats::from_tally(news.id, tally, now)
            })
            .collect();

        self.news_stats_repository.replace_all(&stats).await?;

        info!("Recalculated like stats for {} articles", stats.len());
        Ok(stats.len())
    }
}

impl std::fmt::Debug for LikeServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LikeServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use newsroom_core::{Category, LikeKind, News, Video};
    use newsroom_repository::{
        InMemoryLikeRepository, InMemoryNewsRepository, InMemoryNewsStatsRepository,
        InMemoryVideoRepository,
    };

    mock! {
        pub StatsRepo {}

        #[async_trait]
        impl NewsStatsRepository for StatsRepo {
            async fn replace_all(&self, stats: &[NewsStats]) -> NewsroomResult<()>;
            async fn find_by_news_id(&self, news_id: NewsId) -> NewsroomResult<Option<NewsStats>>;
        }
    }

    fn article(title: &str) -> News {
        News::new(
            UserId::new(),
            title.to_string(),
            "body".to_string(),
            Category::World,
            Vec::new(),
        )
    }

    struct Fixture {
        service: LikeServiceComponent,
        news: Arc<InMemoryNewsRepository>,
        first: NewsId,
        second: NewsId,
    }

    fn fixture() -> Fixture {
        let first = article("Summit opens");
        let second = article("Summit closes");
        let news = Arc::new(InMemoryNewsRepository::with_news(vec![
            first.clone(),
            second.clone(),
        ]));
        let service = LikeServiceComponent::new(
            Arc::new(InMemoryLikeRepository::new()),
            Arc::new(InMemoryNewsStatsRepository::new()),
            news.clone(),
            Arc::new(InMemoryVideoRepository::new()),
        );
        Fixture {
            service,
            news,
            first: first.id,
            second: second.id,
        }
    }

    fn like_from(user_id: UserId, kind: LikeKind) -> AddLikeRequest {
        AddLikeRequest { user_id, kind }
    }

    #[tokio::test]
    async fn test_add_and_list_likes() {
        let f = fixture();
        let target = ContentTarget::News(f.first);

        let added = f
            .service
            .add_like(target, like_from(UserId::new(), LikeKind::Like))
            .await
            .unwrap();
        f.service
            .add_like(target, like_from(UserId::new(), LikeKind::Dislike))
            .await
            .unwrap();

        let likes = f.service.list_likes(target).await.unwrap();
        assert_eq!(likes.len(), 2);
        assert_eq!(likes[0], added);
        assert!(f
            .service
            .list_likes(ContentTarget::News(f.second))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_second_like_from_same_user_conflicts() {
        let f = fixture();
        let target = ContentTarget::News(f.first);
        let user = UserId::new();

        f.service.add_like(target, like_from(user, LikeKind::Like)).await.unwrap();
        let result = f.service.add_like(target, like_from(user, LikeKind::Dislike)).await;

        assert!(matches!(result, Err(NewsroomError::Conflict(_))));
        assert_eq!(f.service.list_likes(target).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_like_on_deleted_news_is_not_found() {
        let f = fixture();
        f.news.soft_delete(f.first).await.unwrap();

        let result = f
            .service
            .add_like(ContentTarget::News(f.first), like_from(UserId::new(), LikeKind::Like))
            .await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_like_on_missing_video_is_not_found() {
        let f = fixture();
        let result = f
            .service
            .add_like(
                ContentTarget::Video(newsroom_core::VideoId::new()),
                like_from(UserId::new(), LikeKind::Like),
            )
            .await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_remove_like() {
        let f = fixture();
        let target = ContentTarget::News(f.first);
        let user = UserId::new();

        f.service.add_like(target, like_from(user, LikeKind::Like)).await.unwrap();
        f.service.remove_like(target, user).await.unwrap();

        assert!(f.service.list_likes(target).await.unwrap().is_empty());
        assert!(matches!(
            f.service.remove_like(target, user).await,
            Err(NewsroomError::NotFound { .. })
        ));
        // The user may react again once the first reaction is gone.
        f.service.add_like(target, like_from(user, LikeKind::Dislike)).await.unwrap();
    }

    #[tokio::test]
    async fn test_recalculate_news_stats() {
        let f = fixture();
        let first = ContentTarget::News(f.first);
        for kind in [LikeKind::Like, LikeKind::Like, LikeKind::Dislike] {
            f.service.add_like(first, like_from(UserId::new(), kind)).await.unwrap();
        }

        assert!(matches!(
            f.service.news_stats(f.first).await,
            Err(NewsroomError::NotFound { .. })
        ));

        let written = f.service.recalculate_news_stats().await.unwrap();
        assert_eq!(written, 2);

        let stats = f.service.news_stats(f.first).await.unwrap();
        assert_eq!((stats.total_likes, stats.total_dislikes), (2, 1));
        let quiet = f.service.news_stats(f.second).await.unwrap();
        assert_eq!((quiet.total_likes, quiet.total_dislikes), (0, 0));
    }

    #[tokio::test]
    async fn test_recalculate_skips_deleted_news() {
        let f = fixture();
        f.service.recalculate_news_stats().await.unwrap();
        f.news.soft_delete(f.second).await.unwrap();

        assert_eq!(f.service.recalculate_news_stats().await.unwrap(), 1);
        assert!(matches!(
            f.service.news_stats(f.second).await,
            Err(NewsroomError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_recalculate_propagates_store_failure() {
        let mut stats_repo = MockStatsRepo::new();
        stats_repo
            .expect_replace_all()
            .times(1)
            .returning(|_| Err(NewsroomError::Database("connection reset".to_string())));

        let service = LikeServiceComponent::new(
            Arc::new(InMemoryLikeRepository::new()),
            Arc::new(stats_repo),
            Arc::new(InMemoryNewsRepository::with_news(vec![article("Lone story")])),
            Arc::new(InMemoryVideoRepository::new()),
        );

        let result = service.recalculate_news_stats().await;
        assert!(matches!(result, Err(NewsroomError::Database(_))));
    }

    #[tokio::test]
    async fn test_video_likes_are_independent() {
        let videos = Arc::new(InMemoryVideoRepository::new());
        let clip = Video::new(
            UserId::new(),
            "Clip".to_string(),
            "desc".to_string(),
            "videos/clip.mp4".to_string(),
        );
        videos.save(&clip).await.unwrap();
        let service = LikeServiceComponent::new(
            Arc::new(InMemoryLikeRepository::new()),
            Arc::new(InMemoryNewsStatsRepository::new()),
            Arc::new(InMemoryNewsRepository::new()),
            videos,
        );
        let user = UserId::new();

        service
            .add_like(ContentTarget::Video(clip.id), like_from(user, LikeKind::Like))
            .await
            .unwrap();

        assert_eq!(service.list_likes(ContentTarget::Video(clip.id)).await.unwrap().len(), 1);
        // Video reactions never show up in article totals.
        assert_eq!(service.recalculate_news_stats().await.unwrap(), 0);
    }
}
