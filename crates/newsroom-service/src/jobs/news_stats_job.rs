//! Recalculates per-article like totals.

use super::scheduler::ScheduledTask;
use crate::like_service::LikeService;
use async_trait::async_trait;
use newsroom_core::NewsroomResult;
use std::sync::Arc;
use tracing::debug;

/// Job name used in the scheduler registry and logs.
pub const NEWS_STATS_JOB: &str = "calculate-news-likes";

/// Replaces the stored like statistics with a fresh count.
pub struct NewsStatsJob {
    like_service: Arc<dyn LikeService>,
}

impl NewsStatsJob {
    #[must_use]
    pub fn new(like_service: Arc<dyn LikeService>) -> Self {
        Self { like_service }
    }
}

#[async_trait]
impl ScheduledTask for NewsStatsJob {
    fn name(&self) -> &str {
        NEWS_STATS_JOB
    }

    async fn run(&self) -> NewsroomResult<()> {
        let written = self.like_service.recalculate_news_stats().await?;
        debug!(articles = written, "News like statistics refreshed");
        Ok(())
    }
}

impl std::fmt::Debug for NewsStatsJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsStatsJob").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::AddLikeRequest;
    use crate::jobs::{cron_expressions, Scheduler};
    use crate::LikeServiceComponent;
    use chrono::Utc;
    use newsroom_core::{Category, ContentTarget, LikeKind, News, UserId};
    use newsroom_repository::{
        InMemoryLikeRepository, InMemoryNewsRepository, InMemoryNewsStatsRepository,
        InMemoryVideoRepository,
    };
    use std::time::Duration;

    #[tokio::test]
    async fn test_scheduled_run_refreshes_stats() {
        let article = News::new(
            UserId::new(),
            "Budget vote".to_string(),
            "body".to_string(),
            Category::Politics,
            Vec::new(),
        );
        let likes: Arc<dyn LikeService> = Arc::new(LikeServiceComponent::new(
            Arc::new(InMemoryLikeRepository::new()),
            Arc::new(InMemoryNewsStatsRepository::new()),
            Arc::new(InMemoryNewsRepository::with_news(vec![article.clone()])),
            Arc::new(InMemoryVideoRepository::new()),
        ));
        likes
            .add_like(
                ContentTarget::News(article.id),
                AddLikeRequest {
                    user_id: UserId::new(),
                    kind: LikeKind::Dislike,
                },
            )
            .await
            .unwrap();

        let scheduler = Scheduler::new(Duration::from_secs(30));
        scheduler
            .schedule(cron_expressions::EVERY_HOUR, Arc::new(NewsStatsJob::new(likes.clone())))
            .unwrap();

        assert_eq!(scheduler.run_due(Utc::now()).await, 1);
        assert_eq!(scheduler.list_jobs()[0].name, NEWS_STATS_JOB);

        let stats = likes.news_stats(article.id).await.unwrap();
        assert_eq!(stats.total_dislikes, 1);
        assert_eq!(stats.total_likes, 0);
    }
}
