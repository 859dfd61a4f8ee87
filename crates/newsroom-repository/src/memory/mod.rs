//! In-memory repository implementations.
//!
//! Used for the `memory` database backend and as the source of truth in
//! service tests. Rows are kept in insertion order, which is creation order.

mod comment_repository;
mod like_repository;
mod news_repository;
mod news_stats_repository;
mod user_repository;
mod video_repository;

pub use comment_repository::*;
pub use like_repository::*;
pub use news_repository::*;
pub use news_stats_repository::*;
pub use user_repository::*;
pub use video_repository::*;
