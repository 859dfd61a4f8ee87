//! Cache store trait.

use super::CacheResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shaku::Interface;

/// Key/value store with a per-entry absolute expiry.
///
/// Implementations must be safe to call concurrently and must never expose a
/// partially written payload.
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the payload under `key` if present and not yet expired.
    ///
    /// A missing key is `Ok(None)`; only connectivity problems are errors.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Replaces the entry under `key`. It stays readable until `expires_at`
    /// or until it is deleted.
    async fn set(&self, key: &str, payload: &[u8], expires_at: DateTime<Utc>) -> CacheResult<()>;

    /// Removes the entry under `key`. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Whether this store holds anything at all. A disabled store is skipped
    /// by the collection cache.
    fn is_enabled(&self) -> bool {
        true
    }
}
