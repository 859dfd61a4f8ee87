//! News article entity.

use crate::{Category, NewsId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A published news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct News {
    /// Unique identifier for the article.
    pub id: NewsId,

    /// Author of the article.
    pub author_id: UserId,

    /// Headline.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Article body.
    #[validate(length(min = 1))]
    pub content: String,

    /// Editorial section.
    pub category: Category,

    /// Free-form tags.
    pub tags: Vec<String>,

    /// Soft-delete marker.
    pub is_deleted: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl News {
    /// Creates a new, live article.
    #[must_use]
    pub fn new(
        author_id: UserId,
        title: String,
        content: String,
        category: Category,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NewsId::new(),
            author_id,
            title,
            content,
            category,
            tags,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the article carries any of the given tags.
    #[must_use]
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|wanted| self.tags.iter().any(|tag| tag == wanted))
    }

    /// Marks the article as deleted.
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
        self.updated_at = Utc::now();
    }

    /// Bumps the update timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
