//! Comment-related DTOs.

use chrono::{DateTime, Utc};
use newsroom_core::validation::rules;
use newsroom_core::{Comment, CommentId, ContentTarget, NewsId, NewsroomError, Page, UserId, VideoId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to post a comment. Exactly one of `news_id` / `video_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub user_id: UserId,

    #[validate(
        length(max = 1000, message = "Text cannot exceed 1000 characters"),
        custom(function = "rules::not_blank")
    )]
    pub text: String,

    #[validate(length(max = 1000, message = "Reply cannot exceed 1000 characters"))]
    pub reply: Option<String>,

    pub news_id: Option<NewsId>,
    pub video_id: Option<VideoId>,
}

impl CreateCommentRequest {
    /// The article or video being commented on.
    pub fn target(&self) -> Result<ContentTarget, NewsroomError> {
        ContentTarget::from_options(self.news_id, self.video_id).map_err(NewsroomError::Validation)
    }
}

/// Request to edit a comment. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Text must be 1-1000 characters"))]
    pub text: Option<String>,

    #[validate(length(max = 1000, message = "Reply cannot exceed 1000 characters"))]
    pub reply: Option<String>,
}

/// Comment response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub user_id: UserId,
    pub news_id: Option<NewsId>,
    pub video_id: Option<VideoId>,
    pub text: String,
    pub reply: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            news_id: comment.target.news_id(),
            video_id: comment.target.video_id(),
            text: comment.text,
            reply: comment.reply,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// One page of comments.
pub type CommentListResponse = Page<CommentResponse>;
