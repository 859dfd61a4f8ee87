//! Cache-aside accessor for one collection.

use super::envelope::{decode, encode};
use super::{metrics, CacheStore, Clock, Snapshot, SystemClock};
use crate::filters::{apply_filter, CollectionFilter};
use chrono::{DateTime, TimeDelta, Utc};
use newsroom_config::{CacheConfig, InvalidationPolicy};
use newsroom_core::{NewsroomResult, Page};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TTL for cached collections (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Per-deployment cache behaviour shared by every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Lifetime of a cached collection.
    pub ttl: Duration,
    /// What a committed write does to the cached collection.
    pub policy: InvalidationPolicy,
    /// Namespace for every key.
    pub key_prefix: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            policy: InvalidationPolicy::Invalidate,
            key_prefix: super::cache_keys::DEFAULT_PREFIX.to_string(),
        }
    }
}

impl From<&CacheConfig> for CacheSettings {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            policy: config.invalidation,
            key_prefix: config.key_prefix.clone(),
        }
    }
}

/// Read-through / write-invalidate cache for one collection.
///
/// The whole live collection is stored under a single key. Filtering and
/// paging always run in memory, on the cached copy or on a fresh load, so
/// both paths return the same page for the same data.
pub struct CollectionCache<T: Snapshot> {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    key: String,
    ttl: Duration,
    policy: InvalidationPolicy,
    _snapshot: PhantomData<fn() -> T>,
}

impl<T: Snapshot> CollectionCache<T> {
    /// Creates the accessor for `T`'s collection on the wall clock.
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, settings: &CacheSettings) -> Self {
        Self::with_clock(store, settings, Arc::new(SystemClock))
    }

    /// Creates the accessor with an explicit clock.
    #[must_use]
    pub fn with_clock(
        store: Arc<dyn CacheStore>,
        settings: &CacheSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            key: T::KIND.key(&settings.key_prefix),
            ttl: settings.ttl,
            policy: settings.policy,
            _snapshot: PhantomData,
        }
    }

    /// The single key this collection lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns one filtered page of the collection.
    ///
    /// `load` is only called on a miss and must return every live row in
    /// creation order. A failure of `load` is the only error this returns.
    pub async fn get_collection<Q, F, Fut>(&self, filter: &Q, load: F) -> NewsroomResult<Page<T>>
    where
        Q: CollectionFilter<T> + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = NewsroomResult<Vec<T>>> + Send,
    {
        let items = match self.read_cached().await {
            Some(items) => items,
            None => {
                let items = live_only(load().await?);
                self.write_snapshot(&items).await;
                items
            }
        };

        Ok(apply_filter(items, filter))
    }

    /// Brings the cached collection in line with a committed write.
    ///
    /// Never fails: if the store cannot be reached the entry simply ages out.
    pub async fn invalidate_collection<F, Fut>(&self, load: F)
    where
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = NewsroomResult<Vec<T>>> + Send,
    {
        if !self.store.is_enabled() {
            return;
        }

        match self.policy {
            InvalidationPolicy::Invalidate => self.delete_entry().await,
            InvalidationPolicy::Refresh => match load().await {
                Ok(items) => {
                    let items = live_only(items);
                    if self.write_snapshot(&items).await {
                        metrics::record_refresh(T::KIND);
                        debug!("Refreshed {} collection ({} items)", T::KIND, items.len());
                    } else {
                        self.delete_entry().await;
                    }
                }
                Err(e) => {
                    warn!("Refresh of {} collection failed, deleting instead: {}", T::KIND, e);
                    self.delete_entry().await;
                }
            },
        }
    }

    async fn read_cached(&self) -> Option<Vec<T>> {
        if !self.store.is_enabled() {
            return None;
        }

        match self.store.get(&self.key).await {
            Ok(Some(payload)) => match decode::<T>(&payload) {
                Ok(items) => {
                    metrics::record_hit(T::KIND);
                    debug!("Cache hit for key '{}' ({} items)", self.key, items.len());
                    Some(items)
                }
                Err(e) => {
                    metrics::record_serialization_failure(T::KIND);
                    warn!("Discarding cached payload for key '{}': {}", self.key, e);
                    None
                }
            },
            Ok(None) => {
                metrics::record_miss(T::KIND);
                debug!("Cache miss for key '{}'", self.key);
                None
            }
            Err(e) => {
                metrics::record_fallback(T::KIND, "get");
                warn!("Reading key '{}' from repository: {}", self.key, e);
                None
            }
        }
    }

    /// Stores the collection. Returns whether the store accepted it.
    async fn write_snapshot(&self, items: &[T]) -> bool {
        if !self.store.is_enabled() {
            return false;
        }

        let now = self.clock.now();
        let payload = match encode(items, now) {
            Ok(payload) => payload,
            Err(e) => {
                metrics::record_serialization_failure(T::KIND);
                warn!("Not caching {} collection: {}", T::KIND, e);
                return false;
            }
        };

        match self
            .store
            .set(&self.key, &payload, expiry_after(now, self.ttl))
            .await
        {
            Ok(()) => true,
            Err(e) => {
                metrics::record_fallback(T::KIND, "set");
                warn!("Failed to cache key '{}': {}", self.key, e);
                false
            }
        }
    }

    async fn delete_entry(&self) {
        match self.store.delete(&self.key).await {
            Ok(()) => {
                metrics::record_invalidation(T::KIND);
                debug!("Invalidated key '{}'", self.key);
            }
            Err(e) => {
                metrics::record_fallback(T::KIND, "delete");
                warn!("Failed to invalidate key '{}': {}", self.key, e);
            }
        }
    }
}

impl<T: Snapshot> Clone for CollectionCache<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            key: self.key.clone(),
            ttl: self.ttl,
            policy: self.policy,
            _snapshot: PhantomData,
        }
    }
}

impl<T: Snapshot> std::fmt::Debug for CollectionCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionCache")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn live_only<T: Snapshot>(items: Vec<T>) -> Vec<T> {
    items.into_iter().filter(|item| !item.is_deleted()).collect()
}

fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{InMemoryCacheStore, ManualClock};
    use crate::filters::NewsFilter;
    use newsroom_core::{Category, News, NewsroomError, PageRequest, UserId};
    use std::future::{ready, Ready};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn never_load() -> Ready<NewsroomResult<Vec<News>>> {
        panic!("loader must not be called")
    }

    fn sports(title: &str) -> News {
        News::new(
            UserId::new(),
            title.to_string(),
            "body".to_string(),
            Category::Sports,
            Vec::new(),
        )
    }

    fn settings(policy: InvalidationPolicy) -> CacheSettings {
        CacheSettings {
            policy,
            ..CacheSettings::default()
        }
    }

    #[tokio::test]
    async fn test_second_read_does_not_touch_loader() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CollectionCache::<News>::new(store, &CacheSettings::default());
        let rows = vec![sports("a"), sports("b")];
        let loads = AtomicUsize::new(0);
        let filter = NewsFilter::default();

        for _ in 0..3 {
            let page = cache
                .get_collection(&filter, || {
                    loads.fetch_add(1, Ordering::SeqCst);
                    ready(Ok(rows.clone()))
                })
                .await
                .unwrap();
            assert_eq!(page.total_records, 2);
        }

        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_loader_failure_is_surfaced() {
        let cache = CollectionCache::<News>::new(
            Arc::new(InMemoryCacheStore::new()),
            &CacheSettings::default(),
        );

        let result = cache
            .get_collection(&NewsFilter::default(), || {
                ready(Err(NewsroomError::Database("connection refused".to_string())))
            })
            .await;

        assert!(matches!(result, Err(NewsroomError::Database(_))));
    }

    #[tokio::test]
    async fn test_deleted_rows_are_not_cached() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CollectionCache::<News>::new(store.clone(), &CacheSettings::default());
        let mut gone = sports("gone");
        gone.soft_delete();
        let rows = vec![sports("kept"), gone];

        let page = cache
            .get_collection(&NewsFilter::default(), || ready(Ok(rows.clone())))
            .await
            .unwrap();
        assert_eq!(page.total_records, 1);

        let payload = store.get(cache.key()).await.unwrap().unwrap();
        let cached: Vec<News> = decode(&payload).unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].title, "kept");
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CollectionCache::<News>::new(store.clone(), &settings(InvalidationPolicy::Invalidate));
        let rows = vec![sports("a")];

        cache
            .get_collection(&NewsFilter::default(), || ready(Ok(rows.clone())))
            .await
            .unwrap();
        assert!(!store.is_empty());

        cache
            .invalidate_collection(never_load)
            .await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_rewrites_entry() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CollectionCache::<News>::new(store.clone(), &settings(InvalidationPolicy::Refresh));
        let fresh = vec![sports("a"), sports("b"), sports("c")];

        cache
            .invalidate_collection(|| ready(Ok(fresh.clone())))
            .await;

        let page = cache
            .get_collection(&NewsFilter::default(), never_load)
            .await
            .unwrap();
        assert_eq!(page.total_records, 3);
    }

    #[tokio::test]
    async fn test_failed_refresh_falls_back_to_delete() {
        let store = Arc::new(InMemoryCacheStore::new());
        let cache = CollectionCache::<News>::new(store.clone(), &settings(InvalidationPolicy::Refresh));
        let rows = vec![sports("a")];

        cache
            .get_collection(&NewsFilter::default(), || ready(Ok(rows.clone())))
            .await
            .unwrap();

        cache
            .invalidate_collection(|| {
                ready(Err(NewsroomError::Database("connection reset".to_string())))
            })
            .await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_entry_written_with_ttl() {
        let clock = Arc::new(ManualClock::default());
        let store = Arc::new(InMemoryCacheStore::with_clock(clock.clone()));
        let cache = CollectionCache::<News>::with_clock(
            store.clone(),
            &CacheSettings {
                ttl: Duration::from_secs(60),
                ..CacheSettings::default()
            },
            clock.clone(),
        );
        let rows = vec![sports("a")];
        let filter = NewsFilter {
            page: PageRequest::new(1, 5),
            ..NewsFilter::default()
        };

        cache
            .get_collection(&filter, || ready(Ok(rows.clone())))
            .await
            .unwrap();

        clock.advance(TimeDelta::seconds(59));
        assert!(store.get(cache.key()).await.unwrap().is_some());
        clock.advance(TimeDelta::seconds(1));
        assert!(store.get(cache.key()).await.unwrap().is_none());
    }

    #[test]
    fn test_expiry_after_saturates() {
        let now = Utc::now();
        assert_eq!(expiry_after(now, Duration::from_secs(5)), now + TimeDelta::seconds(5));
        assert_eq!(expiry_after(now, Duration::MAX), DateTime::<Utc>::MAX_UTC);
    }
}
