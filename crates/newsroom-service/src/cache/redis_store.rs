//! Redis-based cache store.

use super::{CacheError, CacheResult, CacheStore, Clock, SystemClock};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Redis-based cache store.
///
/// `SET` with `PX` replaces an entry atomically, so readers never see a
/// partial payload.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct RedisCacheStore {
    /// Redis connection pool. `None` disables the store.
    pool: Option<Arc<Pool>>,
    #[shaku(default = Arc::new(SystemClock))]
    clock: Arc<dyn Clock>,
}

impl RedisCacheStore {
    /// Creates a store on the given pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self {
            pool: Some(pool),
            clock: Arc::new(SystemClock),
        }
    }

    /// Creates a no-op store (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            clock: Arc::new(SystemClock),
        }
    }

    async fn get_conn(&self) -> CacheResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                CacheError::Unavailable(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(CacheError::Unavailable("Cache is disabled".to_string())),
        }
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("enabled", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

/// Milliseconds left until `expires_at`, or `None` if it has passed.
fn remaining_millis(now: DateTime<Utc>, expires_at: DateTime<Utc>) -> Option<u64> {
    let millis = (expires_at - now).num_milliseconds();
    u64::try_from(millis).ok().filter(|ms| *ms > 0)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set(&self, key: &str, payload: &[u8], expires_at: DateTime<Utc>) -> CacheResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let Some(ttl_ms) = remaining_millis(self.clock.now(), expires_at) else {
            debug!("Expiry for key '{}' already passed, deleting instead", key);
            return self.delete(key).await;
        };

        let mut conn = self.get_conn().await?;
        conn.pset_ex::<_, _, ()>(key, payload, ttl_ms)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {}ms", key, ttl_ms);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn test_disabled_store() {
        let store = RedisCacheStore::disabled();
        assert!(!store.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_store_is_always_empty() {
        let store = RedisCacheStore::disabled();
        store
            .set("k", b"payload", Utc::now() + TimeDelta::seconds(60))
            .await
            .unwrap();
        assert!(store.get("k").await.unwrap().is_none());
        assert!(store.delete("k").await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let pool = deadpool_redis::Config::from_url("redis://127.0.0.1:1")
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .unwrap();
        let store = RedisCacheStore::new(Arc::new(pool));

        let result = store.get("k").await;
        assert!(matches!(result, Err(CacheError::Unavailable(_))));
    }

    #[test]
    fn test_remaining_millis() {
        let now = Utc::now();
        assert_eq!(remaining_millis(now, now + TimeDelta::seconds(2)), Some(2000));
        assert_eq!(remaining_millis(now, now), None);
        assert_eq!(remaining_millis(now, now - TimeDelta::seconds(1)), None);
    }
}
