//! Process-local cache store.

use super::{CacheResult, CacheStore, Clock, SystemClock};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// One payload and its deadline.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    payload: Arc<[u8]>,
    expires_at: DateTime<Utc>,
}

/// Cache store kept in a map inside the process.
///
/// Entries are swapped whole under a short, non-async lock, so a reader sees
/// either the previous payload or the new one.
#[derive(Component)]
#[shaku(interface = CacheStore)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, StoredEntry>>,
    #[shaku(default = Arc::new(SystemClock))]
    clock: Arc<dyn Clock>,
}

impl InMemoryCacheStore {
    /// Creates an empty store on the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store on the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Number of entries that have not expired yet.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .lock()
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    /// Returns true if no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheStore")
            .field("entries", &self.entries.lock().len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let now = self.clock.now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Ok(Some(entry.payload.to_vec())),
            Some(_) => {
                debug!("Evicting expired key '{}'", key);
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, payload: &[u8], expires_at: DateTime<Utc>) -> CacheResult<()> {
        let entry = StoredEntry {
            payload: Arc::from(payload),
            expires_at,
        };

        let mut entries = self.entries.lock();
        if expires_at <= self.clock.now() {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), entry);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
