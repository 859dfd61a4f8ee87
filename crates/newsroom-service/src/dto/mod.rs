//! Data transfer objects for the service layer.

mod comment_dto;
mod like_dto;
mod news_dto;
mod user_dto;
mod video_dto;

pub use comment_dto::*;
pub use like_dto::*;
pub use news_dto::*;
pub use user_dto::*;
pub use video_dto::*;
