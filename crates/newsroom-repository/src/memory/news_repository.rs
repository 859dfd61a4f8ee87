//! In-memory news repository.

use crate::traits::NewsRepository;
use async_trait::async_trait;
use newsroom_core::{News, NewsId, NewsroomError, NewsroomResult};
use shaku::Component;
use tokio::sync::RwLock;

/// News repository backed by a process-local vector.
#[derive(Component, Default)]
#[shaku(interface = NewsRepository)]
pub struct InMemoryNewsRepository {
    #[shaku(default)]
    rows: RwLock<Vec<News>>,
}

impl InMemoryNewsRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with the given rows.
    #[must_use]
    pub fn with_news(rows: Vec<News>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl NewsRepository for InMemoryNewsRepository {
    async fn list_active(&self) -> NewsroomResult<Vec<News>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|n| !n.is_deleted)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: NewsId) -> NewsroomResult<Option<News>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .find(|n| n.id == id && !n.is_deleted)
            .cloned())
    }

    async fn save(&self, news: &News) -> NewsroomResult<News> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|n| n.id == news.id) {
            return Err(NewsroomError::conflict(format!("News {} already exists", news.id)));
        }
        rows.push(news.clone());
        Ok(news.clone())
    }

    async fn update(&self, news: &News) -> NewsroomResult<News> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .iter_mut()
            .find(|n| n.id == news.id && !n.is_deleted)
            .ok_or_else(|| NewsroomError::not_found("News", news.id))?;
        *slot = News {
            is_deleted: false,
            created_at: slot.created_at,
            ..news.clone()
        };
        Ok(slot.clone())
    }

    async fn soft_delete(&self, id: NewsId) -> NewsroomResult<bool> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|n| n.id == id && !n.is_deleted) {
            Some(news) => {
                news.soft_delete();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::{Category, UserId};

    fn create_test_news(title: &str) -> News {
        News::new(
            UserId::new(),
            title.to_string(),
            "body".to_string(),
            Category::World,
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryNewsRepository::new();
        let news = create_test_news("Summit opens");
        repo.save(&news).await.unwrap();

        let found = repo.find_by_id(news.id).await.unwrap();
        assert_eq!(found.unwrap().title, "Summit opens");
    }

    #[tokio::test]
    async fn test_save_duplicate_id_conflicts() {
        let repo = InMemoryNewsRepository::new();
        let news = create_test_news("Summit opens");
        repo.save(&news).await.unwrap();

        let result = repo.save(&news).await;
        assert!(matches!(result, Err(NewsroomError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_active_keeps_creation_order_and_skips_deleted() {
        let first = create_test_news("first");
        let second = create_test_news("second");
        let third = create_test_news("third");
        let repo = InMemoryNewsRepository::with_news(vec![
            first.clone(),
            second.clone(),
            third.clone(),
        ]);

        assert!(repo.soft_delete(second.id).await.unwrap());

        let titles: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["first", "third"]);
    }

    #[tokio::test]
    async fn test_soft_delete_is_not_repeatable() {
        let news = create_test_news("gone");
        let repo = InMemoryNewsRepository::with_news(vec![news.clone()]);

        assert!(repo.soft_delete(news.id).await.unwrap());
        assert!(!repo.soft_delete(news.id).await.unwrap());
        assert!(repo.find_by_id(news.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryNewsRepository::new();
        let result = repo.update(&create_test_news("ghost")).await;
        assert!(matches!(result, Err(NewsroomError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let mut news = create_test_news("draft");
        let repo = InMemoryNewsRepository::with_news(vec![news.clone()]);

        news.title = "final".to_string();
        news.category = Category::Science;
        repo.update(&news).await.unwrap();

        let found = repo.find_by_id(news.id).await.unwrap().unwrap();
        assert_eq!(found.title, "final");
        assert_eq!(found.category, Category::Science);
    }
}
