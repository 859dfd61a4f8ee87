//! Like service trait definition.

use crate::dto::{AddLikeRequest, LikeResponse, NewsStatsResponse};
use async_trait::async_trait;
use newsroom_core::{ContentTarget, Interface, NewsId, NewsroomResult, UserId};

/// Like service trait.
#[async_trait]
pub trait LikeService: Interface + Send + Sync {
    /// Records a reaction. Fails with `NotFound` if the target is gone and
    /// with `Conflict` if the user already reacted to it.
    async fn add_like(&self, target: ContentTarget, request: AddLikeRequest) -> NewsroomResult<LikeResponse>;

    /// Lists every reaction on a live target.
    async fn list_likes(&self, target: ContentTarget) -> NewsroomResult<Vec<LikeResponse>>;

    /// Withdraws a user's reaction.
    async fn remove_like(&self, target: ContentTarget, user_id: UserId) -> NewsroomResult<()>;

    /// Last calculated totals of a live article.
    async fn news_stats(&self, news_id: NewsId) -> NewsroomResult<NewsStatsResponse>;

    /// Recounts reactions of every live article and replaces the stored
    /// totals. Returns the number of articles written.
    async fn recalculate_news_stats(&self) -> NewsroomResult<usize>;
}
