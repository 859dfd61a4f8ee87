//! REST API controllers.

pub mod comment_controller;
pub mod health_controller;
pub mod like_controller;
pub mod news_controller;
pub mod user_controller;
pub mod video_controller;

pub use health_controller::*;
