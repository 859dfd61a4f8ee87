//! Domain entities and value objects.
//!
//! Entities here are the canonical row shapes owned by the repositories.
//! The cache only ever stores serialized copies of them.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
