//! News-related DTOs.

use chrono::{DateTime, Utc};
use newsroom_core::validation::rules;
use newsroom_core::{Category, News, NewsId, Page, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to publish an article.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNewsRequest {
    pub author_id: UserId,

    #[validate(
        length(max = 200, message = "Title cannot exceed 200 characters"),
        custom(function = "rules::not_blank")
    )]
    pub title: String,

    #[validate(custom(function = "rules::not_blank"))]
    pub content: String,

    pub category: Category,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to edit an article. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content cannot be empty"))]
    pub content: Option<String>,

    pub category: Option<Category>,

    pub tags: Option<Vec<String>>,
}

/// News response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub id: NewsId,
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            author_id: news.author_id,
            title: news.title,
            content: news.content,
            category: news.category,
            tags: news.tags,
            created_at: news.created_at,
            updated_at: news.updated_at,
        }
    }
}

/// One page of articles.
pub type NewsListResponse = Page<NewsResponse>;
