//! In-memory comment repository.

use crate::traits::CommentRepository;
use async_trait::async_trait;
use newsroom_core::{Comment, CommentId, ContentTarget, NewsroomError, NewsroomResult};
use shaku::Component;
use tokio::sync::RwLock;

/// Comment repository backed by a process-local vector.
#[derive(Component, Default)]
#[shaku(interface = CommentRepository)]
pub struct InMemoryCommentRepository {
    #[shaku(default)]
    rows: RwLock<Vec<Comment>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list_active(&self, target: Option<ContentTarget>) -> NewsroomResult<Vec<Comment>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|c| !c.is_deleted && target.map_or(true, |t| c.target == t))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: CommentId) -> NewsroomResult<Option<Comment>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|c| c.id == id && !c.is_deleted)
            .cloned())
    }

    async fn save(&self, comment: &Comment) -> NewsroomResult<Comment> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|c| c.id == comment.id) {
            return Err(NewsroomError::conflict(format!(
                "Comment {} already exists",
                comment.id
            )));
        }
        rows.push(comment.clone());
        Ok(comment.clone())
    }

    async fn update(&self, comment: &Comment) -> NewsroomResult<Comment> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|c| c.id == comment.id && !c.is_deleted)
            .ok_or_else(|| NewsroomError::not_found("Comment", comment.id))?;
        slot.text.clone_from(&comment.text);
        slot.reply.clone_from(&comment.reply);
        slot.updated_at = comment.updated_at;
        Ok(slot.clone())
    }

    async fn soft_delete(&self, id: CommentId) -> NewsroomResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|c| c.id == id && !c.is_deleted) {
            Some(comment) => {
                comment.soft_delete();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::{NewsId, UserId, VideoId};

    fn comment(target: ContentTarget, text: &str) -> Comment {
        Comment::new(UserId::new(), target, text.to_string(), None)
    }

    #[tokio::test]
    async fn test_list_active_filters_by_target() {
        let news = ContentTarget::News(NewsId::new());
        let video = ContentTarget::Video(VideoId::new());
        let repo = InMemoryCommentRepository::new();

        repo.save(&comment(news, "first")).await.unwrap();
        repo.save(&comment(video, "elsewhere")).await.unwrap();
        repo.save(&comment(news, "second")).await.unwrap();

        let texts: Vec<String> = repo
            .list_active(Some(news))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(repo.list_active(None).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_soft_deleted_comment_disappears() {
        let target = ContentTarget::News(NewsId::new());
        let saved = comment(target, "gone");
        let repo = InMemoryCommentRepository::new();
        repo.save(&saved).await.unwrap();

        assert!(repo.soft_delete(saved.id).await.unwrap());
        assert!(!repo.soft_delete(saved.id).await.unwrap());
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(repo.list_active(Some(target)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_author_and_target() {
        let target = ContentTarget::Video(VideoId::new());
        let mut saved = comment(target, "draft");
        let repo = InMemoryCommentRepository::new();
        repo.save(&saved).await.unwrap();

        let author = saved.user_id;
        saved.text = "final".to_string();
        saved.user_id = UserId::new();
        let updated = repo.update(&saved).await.unwrap();

        assert_eq!(updated.text, "final");
        assert_eq!(updated.user_id, author);
        assert_eq!(updated.target, target);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryCommentRepository::new();
        let result = repo
            .update(&comment(ContentTarget::News(NewsId::new()), "ghost"))
            .await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }
}
