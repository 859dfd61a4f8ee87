//! Video entity.

use crate::{UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// An uploaded video. The media itself lives in external storage; only its
/// path is recorded here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Video {
    pub id: VideoId,

    pub author_id: UserId,

    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 4000))]
    pub description: String,

    /// Location of the stored media file.
    #[validate(length(min = 1))]
    pub video_path: String,

    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Creates a new, live video record.
    #[must_use]
    pub fn new(author_id: UserId, title: String, description: String, video_path: String) -> Self {
        let now = Utc::now();
        Self {
            id: VideoId::new(),
            author_id,
            title,
            description,
            video_path,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the video as deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Bumps the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
