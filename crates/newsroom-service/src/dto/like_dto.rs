//! Like and statistics DTOs.

use chrono::{DateTime, Utc};
use newsroom_core::{ContentTarget, Like, LikeId, LikeKind, NewsId, NewsStats, UserId};
use serde::{Deserialize, Serialize};

/// Request to react to an article or a video. `kind` defaults to `like`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLikeRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub kind: LikeKind,
}

/// Like response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: LikeId,
    pub user_id: UserId,
    pub target: ContentTarget,
    pub kind: LikeKind,
    pub created_at: DateTime<Utc>,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            id: like.id,
            user_id: like.user_id,
            target: like.target,
            kind: like.kind,
            created_at: like.created_at,
        }
    }
}

/// Last calculated reaction totals of an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsStatsResponse {
    pub news_id: NewsId,
    pub total_likes: u64,
    pub total_dislikes: u64,
    pub last_calculated_at: DateTime<Utc>,
}

impl From<NewsStats> for NewsStatsResponse {
    fn from(stats: NewsStats) -> Self {
        Self {
            news_id: stats.news_id,
            total_likes: stats.total_likes,
            total_dislikes: stats.total_dislikes,
            last_calculated_at: stats.last_calculated_at,
        }
    }
}
