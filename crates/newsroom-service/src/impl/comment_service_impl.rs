//! Comment service implementation.

use super::content_lookup::ensure_live;
use crate::comment_service::CommentService;
use crate::dto::{CommentListResponse, CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use async_trait::async_trait;
use newsroom_core::{
    Comment, CommentId, ContentTarget, NewsroomError, NewsroomResult, PageRequest, ValidateExt,
};
use newsroom_repository::{CommentRepository, NewsRepository, VideoRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Comment service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = CommentService)]
pub struct CommentServiceComponent {
    #[shaku(inject)]
    comment_repository: Arc<dyn CommentRepository>,
    #[shaku(inject)]
    news_repository: Arc<dyn NewsRepository>,
    #[shaku(inject)]
    video_repository: Arc<dyn VideoRepository>,
}

impl CommentServiceComponent {
    /// Creates a comment service outside of a DI module.
    #[must_use]
    pub fn new(
        comment_repository: Arc<dyn CommentRepository>,
        news_repository: Arc<dyn NewsRepository>,
        video_repository: Arc<dyn VideoRepository>,
    ) -> Self {
        Self {
            comment_repository,
            news_repository,
            video_repository,
        }
    }

    async fn find_live(&self, id: CommentId) -> NewsroomResult<Comment> {
        self.comment_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| NewsroomError::not_found("Comment", id))
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
impl CommentService for CommentServiceComponent {
    async fn list_comments(
        &self,
        target: Option<ContentTarget>,
        page: PageRequest,
    ) -> NewsroomResult<CommentListResponse> {
        debug!("Listing comments on {:?}", target);

        if let Some(target) = target {
            self.ensure_target(target).await?;
        }

        let comments = self.comment_repository.list_active(target).await?;
        Ok(page.paginate(comments).map(CommentResponse::from))
    }

    async fn get_comment(&self, id: CommentId) -> NewsroomResult<CommentResponse> {
        debug!("Getting comment: {}", id);

        let comment = self.find_live(id).await?;
        Ok(CommentResponse::from(comment))
    }

    async fn create_comment(&self, request: CreateCommentRequest) -> NewsroomResult<CommentResponse> {
        request.validate_request()?;
        let target = request.target()?;
        debug!("User {} commenting on {}", request.user_id, target);

        self.ensure_target(target).await?;

        let comment = Comment::new(request.user_id, target, request.text, request.reply);
        let saved = self.comment_repository.save(&comment).await?;

        info!("Comment created: {} on {}", saved.id, target);
        Ok(CommentResponse::from(saved))
    }

    async fn update_comment(
        &self,
        id: CommentId,
        request: UpdateCommentRequest,
    ) -> NewsroomResult<CommentResponse> {
        debug!("Updating comment: {}", id);

        request.validate_request()?;

        let mut comment = self.find_live(id).await?;
        if let Some(text) = request.text {
            comment.text = text;
        }
        if request.reply.is_some() {
            comment.reply = request.reply;
        }
        comment.touch();

        let updated = self.comment_repository.update(&comment).await?;

        info!("Comment updated: {}", id);
        Ok(CommentResponse::from(updated))
    }

    async fn delete_comment(&self, id: CommentId) -> NewsroomResult<()> {
        debug!("Deleting comment: {}", id);

        if !self.comment_repository.soft_delete(id).await? {
            return Err(NewsroomError::not_found("Comment", id));
        }

        info!("Comment deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CommentServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::{Category, News, NewsId, UserId, Video, VideoId};
    use newsroom_repository::{
        InMemoryCommentRepository, InMemoryNewsRepository, InMemoryVideoRepository,
    };

    struct Fixture {
        service: CommentServiceComponent,
        news: Arc<InMemoryNewsRepository>,
        news_id: NewsId,
        video_id: VideoId,
    }

    async fn fixture() -> Fixture {
        let author = UserId::new();
        let article = News::new(
            author,
            "Match report".to_string(),
            "body".to_string(),
            Category::Sports,
            Vec::new(),
        );
        let clip = Video::new(
            author,
            "Highlights".to_string(),
            "goals".to_string(),
            "videos/highlights.mp4".to_string(),
        );
        let news = Arc::new(InMemoryNewsRepository::with_news(vec![article.clone()]));
        let videos = Arc::new(InMemoryVideoRepository::new());
        videos.save(&clip).await.unwrap();

        Fixture {
            service: CommentServiceComponent::new(
                Arc::new(InMemoryCommentRepository::new()),
                news.clone(),
                videos,
            ),
            news,
            news_id: article.id,
            video_id: clip.id,
        }
    }

    fn on_news(news_id: NewsId, text: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            user_id: UserId::new(),
            text: text.to_string(),
            reply: None,
            news_id: Some(news_id),
            video_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_by_target() {
        let f = fixture().await;

        f.service.create_comment(on_news(f.news_id, "first")).await.unwrap();
        f.service
            .create_comment(CreateCommentRequest {
                news_id: None,
                video_id: Some(f.video_id),
                ..on_news(f.news_id, "on the clip")
            })
            .await
            .unwrap();
        f.service.create_comment(on_news(f.news_id, "second")).await.unwrap();

        let page = f
            .service
            .list_comments(Some(ContentTarget::News(f.news_id)), PageRequest::first())
            .await
            .unwrap();
        let texts: Vec<&str> = page.items.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(page.total_records, 2);

        let all = f.service.list_comments(None, PageRequest::first()).await.unwrap();
        assert_eq!(all.total_records, 3);
    }

    #[tokio::test]
    async fn test_create_requires_exactly_one_target() {
        let f = fixture().await;

        let neither = CreateCommentRequest {
            news_id: None,
            ..on_news(f.news_id, "lost")
        };
        let both = CreateCommentRequest {
            video_id: Some(f.video_id),
            ..on_news(f.news_id, "greedy")
        };

        for request in [neither, both] {
            let result = f.service.create_comment(request).await;
            assert!(matches!(result, Err(NewsroomError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_comment_on_deleted_news_is_not_found() {
        let f = fixture().await;
        f.news.soft_delete(f.news_id).await.unwrap();

        let result = f.service.create_comment(on_news(f.news_id, "too late")).await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));

        let result = f
            .service
            .list_comments(Some(ContentTarget::News(f.news_id)), PageRequest::first())
            .await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let f = fixture().await;
        let result = f.service.create_comment(on_news(f.news_id, "   ")).await;
        assert!(matches!(result, Err(NewsroomError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_omitted_fields() {
        let f = fixture().await;
        let created = f
            .service
            .create_comment(CreateCommentRequest {
                reply: Some("thanks".to_string()),
                ..on_news(f.news_id, "draft")
            })
            .await
            .unwrap();

        let updated = f
            .service
            .update_comment(
                created.id,
                UpdateCommentRequest {
                    text: Some("final".to_string()),
                    reply: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.text, "final");
        assert_eq!(updated.reply.as_deref(), Some("thanks"));
        assert_eq!(updated.news_id, Some(f.news_id));
    }

    #[tokio::test]
    async fn test_delete_hides_comment() {
        let f = fixture().await;
        let created = f.service.create_comment(on_news(f.news_id, "bye")).await.unwrap();

        f.service.delete_comment(created.id).await.unwrap();

        assert!(matches!(
            f.service.get_comment(created.id).await,
            Err(NewsroomError::NotFound { .. })
        ));
        assert!(matches!(
            f.service.delete_comment(created.id).await,
            Err(NewsroomError::NotFound { .. })
        ));
        let page = f
            .service
            .list_comments(Some(ContentTarget::News(f.news_id)), PageRequest::first())
            .await
            .unwrap();
        assert!(page.is_empty());
    }
}
