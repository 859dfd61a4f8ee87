//! Existence checks for the content comments and likes attach to.

use newsroom_core::{ContentTarget, NewsroomError, NewsroomResult};
use newsroom_repository::{NewsRepository, VideoRepository};

/// Fails with `NotFound` unless the article or video exists and is not deleted.
pub(crate) async fn ensure_live(
    news_repository: &dyn NewsRepository,
    video_repository: &dyn VideoRepository,
    target: ContentTarget,
) -> NewsroomResult<()> {
    let found = match target {
        ContentTarget::News(id) => news_repository.find_by_id(id).await?.is_some(),
        ContentTarget::Video(id) => video_repository.find_by_id(id).await?.is_some(),
    };

    if found {
        Ok(())
    } else {
        match target {
            ContentTarget::News(id) => Err(NewsroomError::not_found("News", id)),
            ContentTarget::Video(id) => Err(NewsroomError::not_found("Video", id)),
        }
    }
}
