//! In-memory news statistics repository.

use crate::traits::NewsStatsRepository;
use async_trait::async_trait;
use newsroom_core::{NewsId, NewsStats, NewsroomResult};
use shaku::Component;
use tokio::sync::RwLock;

/// Statistics held in process memory; replaced wholesale on each run.
#[derive(Component, Default)]
#[shaku(interface = NewsStatsRepository)]
pub struct InMemoryNewsStatsRepository {
    #[shaku(default)]
    rows: RwLock<Vec<NewsStats>>,
}

impl InMemoryNewsStatsRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStatsRepository for InMemoryNewsStatsRepository {
    async fn replace_all(&self, stats: &[NewsStats]) -> NewsroomResult<()> {
        *self.rows.write().await = stats.to_vec();
        Ok(())
    }

    async fn find_by_news_id(&self, news_id: NewsId) -> NewsroomResult<Option<NewsStats>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|s| s.news_id == news_id)
            .cloned())
    }
}
