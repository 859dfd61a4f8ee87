//! Video service trait definition.

use crate::dto::{CreateVideoRequest, UpdateVideoRequest, VideoListResponse, VideoResponse};
use crate::filters::VideoFilter;
use async_trait::async_trait;
use newsroom_core::{Interface, NewsroomResult, VideoId};

/// Video service trait.
#[async_trait]
pub trait VideoService: Interface + Send + Sync {
    /// Lists live videos matching the filter, served through the cache.
    async fn list_videos(&self, filter: VideoFilter) -> NewsroomResult<VideoListResponse>;

    /// Gets a live video by ID.
    async fn get_video(&self, id: VideoId) -> NewsroomResult<VideoResponse>;

    /// Registers a video whose media file is already stored.
    async fn create_video(&self, request: CreateVideoRequest) -> NewsroomResult<VideoResponse>;

    /// Edits a video.
    async fn update_video(&self, id: VideoId, request: UpdateVideoRequest) -> NewsroomResult<VideoResponse>;

    /// Soft-deletes a video.
    async fn delete_video(&self, id: VideoId) -> NewsroomResult<()>;
}
