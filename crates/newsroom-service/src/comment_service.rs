//! Comment service trait definition.

use crate::dto::{CommentListResponse, CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use async_trait::async_trait;
use newsroom_core::{CommentId, ContentTarget, Interface, NewsroomResult, PageRequest};

/// Comment service trait.
///
/// Comments are read straight from the repository; they are not a cached
/// collection.
#[async_trait]
pub trait CommentService: Interface + Send + Sync {
    /// Lists live comments, oldest first. With a target, only comments on
    /// that live article or video.
    async fn list_comments(
        &self,
        target: Option<ContentTarget>,
        page: PageRequest,
    ) -> NewsroomResult<CommentListResponse>;

    /// Gets a live comment by ID.
    async fn get_comment(&self, id: CommentId) -> NewsroomResult<CommentResponse>;

    /// Posts a comment on a live article or video.
    async fn create_comment(&self, request: CreateCommentRequest) -> NewsroomResult<CommentResponse>;

    /// Edits a comment's text or reply.
    async fn update_comment(
        &self,
        id: CommentId,
        request: UpdateCommentRequest,
    ) -> NewsroomResult<CommentResponse>;

    /// Soft-deletes a comment.
    async fn delete_comment(&self, id: CommentId) -> NewsroomResult<()>;
}
