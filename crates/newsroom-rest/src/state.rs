//! Application state for Axum handlers.

use newsroom_service::{CommentService, LikeService, NewsService, UserService, VideoService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub news_service: Arc<dyn NewsService>,
    pub video_service: Arc<dyn VideoService>,
    pub user_service: Arc<dyn UserService>,
    pub comment_service: Arc<dyn CommentService>,
    pub like_service: Arc<dyn LikeService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        news_service: Arc<dyn NewsService>,
        video_service: Arc<dyn VideoService>,
        user_service: Arc<dyn UserService>,
        comment_service: Arc<dyn CommentService>,
        like_service: Arc<dyn LikeService>,
    ) -> Self {
        Self {
            news_service,
            video_service,
            user_service,
            comment_service,
            like_service,
        }
    }

    /// Resolves every service from a Shaku module.
    pub fn from_module<M>(module: &M) -> Self
    where
        M: Module
            + HasComponent<dyn NewsService>
            + HasComponent<dyn VideoService>
            + HasComponent<dyn UserService>
            + HasComponent<dyn CommentService>
            + HasComponent<dyn LikeService>,
    {
        Self {
            news_service: module.resolve(),
            video_service: module.resolve(),
            user_service: module.resolve(),
            comment_service: module.resolve(),
            like_service: module.resolve(),
        }
    }
}
