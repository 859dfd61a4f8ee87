//! Request extractors and query-string helpers.

mod pagination;
mod path_id;

pub use pagination::*;
pub use path_id::*;
