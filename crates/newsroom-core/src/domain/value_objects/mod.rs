//! Value objects.

mod category;
mod content_target;
mod email;
mod role;

pub use category::*;
pub use content_target::*;
pub use email::*;
pub use role::*;
