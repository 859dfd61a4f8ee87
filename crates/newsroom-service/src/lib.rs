//! # Newsroom Service
//!
//! Business logic for news, videos and users, plus the read-through /
//! write-invalidate cache that sits in front of every collection list.
//! Comments and likes are served uncached; the `jobs` scheduler keeps the
//! per-article like totals current.

pub mod cache;
pub mod comment_service;
pub mod dto;
pub mod filters;
pub mod r#impl;
pub mod jobs;
pub mod like_service;
pub mod news_service;
pub mod user_service;
pub mod video_service;

pub use cache::*;
pub use comment_service::*;
pub use dto::*;
pub use filters::*;
pub use news_service::*;
pub use r#impl::*;
pub use jobs::*;
pub use like_service::*;
pub use user_service::*;
pub use video_service::*;
