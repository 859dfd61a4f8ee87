//! Caching infrastructure for the service layer.
//!
//! A [`CacheStore`] is a plain key/value store with absolute expiry. Each
//! collection (news, videos, users) gets one [`CollectionCache`] that keeps
//! the full live collection under a single key and answers filtered, paged
//! list reads from it.

pub mod cache_keys;
mod clock;
mod collection;
mod envelope;
mod error;
mod memory_store;
pub mod metrics;
mod redis_store;
mod snapshot;
mod store;

pub use cache_keys::CollectionKind;
pub use clock::{Clock, ManualClock, SystemClock};
pub use collection::{CacheSettings, CollectionCache, DEFAULT_TTL};
pub use envelope::SCHEMA_VERSION;
pub use error::{CacheError, CacheResult};
pub use memory_store::{InMemoryCacheStore, InMemoryCacheStoreParameters};
pub use redis_store::{RedisCacheStore, RedisCacheStoreParameters};
pub use snapshot::Snapshot;
pub use store::CacheStore;
