//! Shared fixtures for service-level cache tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use newsroom_core::{Category, News, NewsId, NewsroomResult, UserId};
use newsroom_repository::{InMemoryNewsRepository, NewsRepository};
use newsroom_service::{CacheError, CacheResult, CacheStore};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A cache store whose backend is never reachable.
#[derive(Debug, Default)]
pub struct UnreachableCacheStore {
    calls: AtomicUsize,
}

impl UnreachableCacheStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> CacheResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CacheError::Unavailable("connection refused".to_string()))
    }
}

#[async_trait]
impl CacheStore for UnreachableCacheStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.fail()
    }

    async fn set(&self, _key: &str, _payload: &[u8], _expires_at: DateTime<Utc>) -> CacheResult<()> {
        self.fail()
    }

    async fn delete(&self, _key: &str) -> CacheResult<()> {
        self.fail()
    }
}

/// In-memory news repository that counts full-collection loads.
#[derive(Default)]
pub struct CountingNewsRepository {
    inner: InMemoryNewsRepository,
    loads: AtomicUsize,
}

impl CountingNewsRepository {
    pub fn with_news(rows: Vec<News>) -> Self {
        Self {
            inner: InMemoryNewsRepository::with_news(rows),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsRepository for CountingNewsRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<News>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_active().await
    }

    async fn find_by_id(&self, id: NewsId) -> NewsroomResult<Option<News>> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, news: &News) -> NewsroomResult<News> {
        self.inner.save(news).await
    }

    async fn update(&self, news: &News) -> NewsroomResult<News> {
        self.inner.update(news).await
    }

    async fn soft_delete(&self, id: NewsId) -> NewsroomResult<bool> {
        self.inner.soft_delete(id).await
    }
}

/// Builds `count` articles titled `"{prefix} {n}"`, numbered from 1.
pub fn articles(prefix: &str, category: Category, count: usize) -> Vec<News> {
    let author = UserId::new();
    (1..=count)
        .map(|n| {
            News::new(
                author,
                format!("{} {}", prefix, n),
                "body".to_string(),
                category,
                vec![category.to_string()],
            )
        })
        .collect()
}
