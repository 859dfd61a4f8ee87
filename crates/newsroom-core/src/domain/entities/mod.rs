//! Domain entities.

mod comment;
mod like;
mod news;
mod user;
mod video;

pub use comment::*;
pub use like::*;
pub use news::*;
pub use user::*;
pub use video::*;
