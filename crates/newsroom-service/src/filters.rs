//! In-memory list filters.
//!
//! The same predicate runs whether the collection came from the cache or
//! from a fresh repository load.

use crate::cache::Snapshot;
use newsroom_core::{Category, News, Page, PageRequest, Role, User, UserId, Video};

/// Predicate plus page selection over one collection.
pub trait CollectionFilter<T>: Send + Sync {
    /// Whether `item` belongs in the result.
    fn matches(&self, item: &T) -> bool;

    /// Which page of the matching items to return.
    fn page_request(&self) -> PageRequest;
}

/// Drops soft-deleted items, applies the filter, then cuts the page.
pub fn apply_filter<T, Q>(items: Vec<T>, filter: &Q) -> Page<T>
where
    T: Snapshot,
    Q: CollectionFilter<T> + ?Sized,
{
    let matching: Vec<T> = items
        .into_iter()
        .filter(|item| !item.is_deleted() && filter.matches(item))
        .collect();
    filter.page_request().paginate(matching)
}

/// News list filter. Every criterion that is set must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    /// Exact author.
    pub author_id: Option<UserId>,
    /// Exact title.
    pub title: Option<String>,
    /// Exact category.
    pub category: Option<Category>,
    /// Article must carry at least one of these tags. Empty means any.
    pub tags: Vec<String>,
    pub page: PageRequest,
}

impl CollectionFilter<News> for NewsFilter {
    fn matches(&self, news: &News) -> bool {
        self.author_id.map_or(true, |author| news.author_id == author)
            && self.title.as_ref().map_or(true, |title| &news.title == title)
            && self.category.map_or(true, |category| news.category == category)
            && (self.tags.is_empty() || news.has_any_tag(&self.tags))
    }

    fn page_request(&self) -> PageRequest {
        self.page
    }
}

/// Video list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub author_id: Option<UserId>,
    pub title: Option<String>,
    pub page: PageRequest,
}

impl CollectionFilter<Video> for VideoFilter {
    fn matches(&self, video: &Video) -> bool {
        self.author_id.map_or(true, |author| video.author_id == author)
            && self.title.as_ref().map_or(true, |title| &video.title == title)
    }

    fn page_request(&self) -> PageRequest {
        self.page
    }
}

/// User list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring of the nickname.
    pub nickname: Option<String>,
    /// Case-insensitive substring of the email address.
    pub email: Option<String>,
    /// User must hold this role.
    pub role: Option<Role>,
    pub page: PageRequest,
}

impl CollectionFilter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        self.nickname.as_ref().map_or(true, |needle| {
            user.nickname.to_lowercase().contains(&needle.to_lowercase())
        }) && self
            .email
            .as_ref()
            .map_or(true, |needle| user.email.contains_ignore_case(needle))
            && self.role.map_or(true, |role| user.has_role(role))
    }

    fn page_request(&self) -> PageRequest {
        self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::Email;

    fn news(author: UserId, title: &str, category: Category, tags: &[&str]) -> News {
        News::new(
            author,
            title.to_string(),
            "body".to_string(),
            category,
            tags.iter().map(|t| (*t).to_string()).collect(),
        )
    }

    fn user(nickname: &str, email: &str, roles: &[Role]) -> User {
        let mut user = User::new(nickname.to_string(), Email::new(email).unwrap(), String::new());
        user.set_roles(roles.iter().copied());
        user
    }

    #[test]
    fn test_default_news_filter_matches_everything() {
        let filter = NewsFilter::default();
        assert!(filter.matches(&news(UserId::new(), "x", Category::World, &[])));
    }

    #[test]
    fn test_news_filter_criteria_are_conjunctive() {
        let author = UserId::new();
        let filter = NewsFilter {
            author_id: Some(author),
            category: Some(Category::Sports),
            ..NewsFilter::default()
        };

        assert!(filter.matches(&news(author, "Cup final", Category::Sports, &[])));
        assert!(!filter.matches(&news(author, "Cup final", Category::Politics, &[])));
        assert!(!filter.matches(&news(UserId::new(), "Cup final", Category::Sports, &[])));
    }

    #[test]
    fn test_news_title_is_exact() {
        let filter = NewsFilter {
            title: Some("Cup final".to_string()),
            ..NewsFilter::default()
        };
        assert!(filter.matches(&news(UserId::new(), "Cup final", Category::Sports, &[])));
        assert!(!filter.matches(&news(UserId::new(), "Cup final recap", Category::Sports, &[])));
        assert!(!filter.matches(&news(UserId::new(), "cup final", Category::Sports, &[])));
    }

    #[test]
    fn test_news_tags_intersect() {
        let filter = NewsFilter {
            tags: vec!["derby".to_string(), "transfer".to_string()],
            ..NewsFilter::default()
        };
        assert!(filter.matches(&news(UserId::new(), "a", Category::Sports, &["transfer"])));
        assert!(!filter.matches(&news(UserId::new(), "b", Category::Sports, &["injury"])));
        assert!(!filter.matches(&news(UserId::new(), "c", Category::Sports, &[])));
    }

    #[test]
    fn test_user_filter_is_case_insensitive_substring() {
        let filter = UserFilter {
            nickname: Some("DESK".to_string()),
            email: Some("Example".to_string()),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("newsdesk", "desk@example.com", &[Role::User])));
        assert!(!filter.matches(&user("newsdesk", "desk@gazette.org", &[Role::User])));
    }

    #[test]
    fn test_user_filter_role_membership() {
        let filter = UserFilter {
            role: Some(Role::Moderator),
            ..UserFilter::default()
        };
        assert!(filter.matches(&user("a", "a@example.com", &[Role::User, Role::Moderator])));
        assert!(!filter.matches(&user("b", "b@example.com", &[Role::Admin])));
    }

    #[test]
    fn test_apply_filter_skips_deleted_then_paginates() {
        let mut items: Vec<News> = (1..=6)
            .map(|i| news(UserId::new(), &format!("n{i}"), Category::Health, &[]))
            .collect();
        items[0].soft_delete();

        let filter = NewsFilter {
            page: PageRequest::new(2, 2),
            ..NewsFilter::default()
        };
        let page = apply_filter(items, &filter);

        let titles: Vec<&str> = page.items.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["n4", "n5"]);
        assert_eq!(page.total_records, 5);
        assert_eq!(page.total_pages, 3);
    }
}
