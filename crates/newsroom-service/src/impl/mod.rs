//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `news_service.rs`).

pub mod comment_service_impl;
mod content_lookup;
pub mod like_service_impl;
pub mod news_service_impl;
pub mod user_service_impl;
pub mod video_service_impl;

pub use comment_service_impl::{CommentServiceComponent, CommentServiceComponentParameters};
pub use like_service_impl::{LikeServiceComponent, LikeServiceComponentParameters};
pub use news_service_impl::{NewsServiceComponent, NewsServiceComponentParameters};
pub use user_service_impl::{UserServiceComponent, UserServiceComponentParameters};
pub use video_service_impl::{VideoServiceComponent, VideoServiceComponentParameters};
