//! In-memory like repository.

use crate::traits::LikeRepository;
use async_trait::async_trait;
use newsroom_core::{
    ContentTarget, Like, LikeTally, NewsId, NewsroomError, NewsroomResult, UserId,
};
use shaku::Component;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Like repository backed by a process-local vector.
#[derive(Component, Default)]
#[shaku(interface = LikeRepository)]
pub struct InMemoryLikeRepository {
    #[shaku(default)]
    rows: RwLock<Vec<Like>>,
}

impl InMemoryLikeRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn list_for(&self, target: ContentTarget) -> NewsroomResult<Vec<Like>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|l| l.target == target)
            .cloned()
            .collect())
    }

    async fn find(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<Option<Like>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|l| l.user_id == user_id && l.target == target)
            .cloned())
    }

    async fn save(&self, like: &Like) -> NewsroomResult<Like> {
        let mut rows = self.rows.write().await;
        if rows
            .iter()
            .any(|l| l.user_id == like.user_id && l.target == like.target)
        {
            return Err(NewsroomError::conflict(format!(
                "User {} already reacted to {}",
                like.user_id, like.target
            )));
        }
        rows.push(like.clone());
        Ok(like.clone())
    }

    async fn delete(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|l| !(l.user_id == user_id && l.target == target));
        Ok(rows.len() < before)
    }

    async fn tally_news(&self) -> NewsroomResult<HashMap<NewsId, LikeTally>> {
        let mut tallies: HashMap<NewsId, LikeTally> = HashMap::new();
        for like in self.rows.read().await.iter() {
            if let ContentTarget::News(news_id) = like.target {
                tallies.entry(news_id).or_default().add(like.kind);
            }
        }
        Ok(tallies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::{LikeKind, VideoId};

    #[tokio::test]
    async fn test_second_like_by_same_user_conflicts() {
        let repo = InMemoryLikeRepository::new();
        let user = UserId::new();
        let target = ContentTarget::News(NewsId::new());

        repo.save(&Like::new(user, target, LikeKind::Like)).await.unwrap();
        let result = repo.save(&Like::new(user, target, LikeKind::Dislike)).await;
        assert!(matches!(result, Err(NewsroomError::Conflict(_))));

        // Another user is fine.
        repo.save(&Like::new(UserId::new(), target, LikeKind::Like))
            .await
            .unwrap();
        assert_eq!(repo.list_for(target).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_only_removes_own_like() {
        let repo = InMemoryLikeRepository::new();
        let user = UserId::new();
        let other = UserId::new();
        let target = ContentTarget::Video(VideoId::new());
        repo.save(&Like::new(user, target, LikeKind::Like)).await.unwrap();
        repo.save(&Like::new(other, target, LikeKind::Like)).await.unwrap();

        assert!(repo.delete(user, target).await.unwrap());
        assert!(!repo.delete(user, target).await.unwrap());
        assert!(repo.find(user, target).await.unwrap().is_none());
        assert!(repo.find(other, target).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_tally_news_ignores_videos() {
        let repo = InMemoryLikeRepository::new();
        let news_id = NewsId::new();
        let news = ContentTarget::News(news_id);
        let video = ContentTarget::Video(VideoId::new());

        repo.save(&Like::new(UserId::new(), news, LikeKind::Like)).await.unwrap();
        repo.save(&Like::new(UserId::new(), news, LikeKind::Dislike)).await.unwrap();
        repo.save(&Like::new(UserId::new(), news, LikeKind::Like)).await.unwrap();
        repo.save(&Like::new(UserId::new(), video, LikeKind::Like)).await.unwrap();

        let tallies = repo.tally_news().await.unwrap();
        assert_eq!(tallies.len(), 1);
        assert_eq!(tallies[&news_id], LikeTally { likes: 2, dislikes: 1 });
    }
}
