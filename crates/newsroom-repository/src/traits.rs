//! Repository trait definitions.

use async_trait::async_trait;
use newsroom_core::{
    Comment, CommentId, ContentTarget, Interface, Like, LikeTally, News, NewsId, NewsStats,
    NewsroomResult, User, UserId, Video, VideoId,
};
use std::collections::HashMap;

/// News repository trait.
#[async_trait]
pub trait NewsRepository: Interface + Send + Sync {
    /// Returns every article that is not soft-deleted, oldest first.
    async fn list_active(&self) -> NewsroomResult<Vec<News>>;

    /// Finds a live article by ID.
    async fn find_by_id(&self, id: NewsId) -> NewsroomResult<Option<News>>;

    /// Saves a new article.
    async fn save(&self, news: &News) -> NewsroomResult<News>;

    /// Updates an existing live article. Fails with `NotFound` otherwise.
    async fn update(&self, news: &News) -> NewsroomResult<News>;

    /// Marks an article as deleted. Returns false if there was no live row.
    async fn soft_delete(&self, id: NewsId) -> NewsroomResult<bool>;
}

/// Video repository trait.
#[async_trait]
pub trait VideoRepository: Interface + Send + Sync {
    /// Returns every video that is not soft-deleted, oldest first.
    async fn list_active(&self) -> NewsroomResult<Vec<Video>>;

    /// Finds a live video by ID.
    async fn find_by_id(&self, id: VideoId) -> NewsroomResult<Option<Video>>;

    /// Saves a new video record.
    async fn save(&self, video: &Video) -> NewsroomResult<Video>;

    /// Updates an existing live video. Fails with `NotFound` otherwise.
    async fn update(&self, video: &Video) -> NewsroomResult<Video>;

    /// Marks a video as deleted. Returns false if there was no live row.
    async fn soft_delete(&self, id: VideoId) -> NewsroomResult<bool>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every user that is not soft-deleted, oldest first.
    async fn list_active(&self) -> NewsroomResult<Vec<User>>;

    /// Finds a live user by ID.
    async fn find_by_id(&self, id: UserId) -> NewsroomResult<Option<User>>;

    /// Checks whether a live user already owns the email address.
    async fn exists_by_email(&self, email: &str) -> NewsroomResult<bool>;

    /// Saves a new user.
    async fn save(&self, user: &User) -> NewsroomResult<User>;

    /// Updates an existing live user. Fails with `NotFound` otherwise.
    async fn update(&self, user: &User) -> NewsroomResult<User>;

    /// Marks a user as deleted. Returns false if there was no live row.
    async fn soft_delete(&self, id: UserId) -> NewsroomResult<bool>;
}

/// Comment repository trait.
#[async_trait]
pub trait CommentRepository: Interface + Send + Sync {
    /// Returns live comments, oldest first, optionally only those on `target`.
    async fn list_active(&self, target: Option<ContentTarget>) -> NewsroomResult<Vec<Comment>>;

    /// Finds a live comment by ID.
    async fn find_by_id(&self, id: CommentId) -> NewsroomResult<Option<Comment>>;

    /// Saves a new comment.
    async fn save(&self, comment: &Comment) -> NewsroomResult<Comment>;

    /// Updates the text and reply of a live comment. Fails with `NotFound` otherwise.
    async fn update(&self, comment: &Comment) -> NewsroomResult<Comment>;

    /// Marks a comment as deleted. Returns false if there was no live row.
    async fn soft_delete(&self, id: CommentId) -> NewsroomResult<bool>;
}

/// Like repository trait.
#[async_trait]
pub trait LikeRepository: Interface + Send + Sync {
    /// Returns every like on `target`, oldest first.
    async fn list_for(&self, target: ContentTarget) -> NewsroomResult<Vec<Like>>;

    /// Finds the like `user_id` left on `target`.
    async fn find(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<Option<Like>>;

    /// Saves a like. A second like by the same user on the same target is a `Conflict`.
    async fn save(&self, like: &Like) -> NewsroomResult<Like>;

    /// Removes the like `user_id` left on `target`. Returns false if there was none.
    async fn delete(&self, user_id: UserId, target: ContentTarget) -> NewsroomResult<bool>;

    /// Like and dislike counts per article, for every article that has any.
    async fn tally_news(&self) -> NewsroomResult<HashMap<NewsId, LikeTally>>;
}

/// News statistics repository trait.
#[async_trait]
pub trait NewsStatsRepository: Interface + Send + Sync {
    /// Replaces every stored row with `stats` in one step.
    async fn replace_all(&self, stats: &[NewsStats]) -> NewsroomResult<()>;

    /// Finds the last calculated stats of an article.
    async fn find_by_news_id(&self, news_id: NewsId) -> NewsroomResult<Option<NewsStats>>;
}
