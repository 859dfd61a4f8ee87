//! # Newsroom Repository
//!
//! Source-of-truth access for news, videos, users, comments and likes.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn NewsRepository>      (domain interface)
//! PgNewsRepository | InMemoryNewsRepository
//!   ↓
//! PostgreSQL | process memory
//! ```
//!
//! Every repository hands back only rows that are not soft-deleted, in
//! creation order.

pub mod memory;
pub mod pool;
pub mod postgres;
pub mod traits;

pub use memory::*;
pub use pool::*;
pub use postgres::*;
pub use traits::*;
