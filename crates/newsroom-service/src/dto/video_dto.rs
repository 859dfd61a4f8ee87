//! Video-related DTOs.

use chrono::{DateTime, Utc};
use newsroom_core::validation::rules;
use newsroom_core::{Page, UserId, Video, VideoId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register an uploaded video.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVideoRequest {
    pub author_id: UserId,

    #[validate(
        length(max = 200, message = "Title cannot exceed 200 characters"),
        custom(function = "rules::not_blank")
    )]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 4000))]
    pub description: String,

    /// Where the already stored media file lives.
    #[validate(custom(function = "rules::not_blank"))]
    pub video_path: String,
}

/// Request to edit a video. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 4000))]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Video path cannot be empty"))]
    pub video_path: Option<String>,
}

/// Video response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    pub id: VideoId,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub video_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self {
            id: video.id,
            author_id: video.author_id,
            title: video.title,
            description: video.description,
            video_path: video.video_path,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

/// One page of videos.
pub type VideoListResponse = Page<VideoResponse>;
