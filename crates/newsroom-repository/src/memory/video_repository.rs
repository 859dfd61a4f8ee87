//! In-memory video repository.

use crate::traits::VideoRepository;
use async_trait::async_trait;
use newsroom_core::{NewsroomError, NewsroomResult, Video, VideoId};
use shaku::Component;
use tokio::sync::RwLock;

/// Video repository backed by a process-local vector.
#[derive(Component, Default)]
#[shaku(interface = VideoRepository)]
pub struct InMemoryVideoRepository {
    #[shaku(default)]
    rows: RwLock<Vec<Video>>,
}

impl InMemoryVideoRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given rows.
    #[must_use]
    pub fn with_videos(rows: Vec<Video>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<Video>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|v| !v.is_deleted)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: VideoId) -> NewsroomResult<Option<Video>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|v| v.id == id && !v.is_deleted)
            .cloned())
    }

    async fn save(&self, video: &Video) -> NewsroomResult<Video> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|v| v.id == video.id) {
            return Err(NewsroomError::conflict(format!("Video {} already exists", video.id)));
        }
        rows.push(video.clone());
        Ok(video.clone())
    }

    async fn update(&self, video: &Video) -> NewsroomResult<Video> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|v| v.id == video.id && !v.is_deleted)
            .ok_or_else(|| NewsroomError::not_found("Video", video.id))?;
        *slot = Video {
            is_deleted: false,
            created_at: slot.created_at,
            ..video.clone()
        };
        Ok(slot.clone())
    }

    async fn soft_delete(&self, id: VideoId) -> NewsroomResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|v| v.id == id && !v.is_deleted) {
            Some(video) => {
                video.soft_delete();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
