//! Pagination query parameters.

use newsroom_core::PageRequest;
use serde::Deserialize;

/// Query parameters for pagination, `?page=2&size=5`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        PageRequest::new(
            query.page.unwrap_or(1),
            query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        )
    }
}

/// Splits a comma-separated query value, dropping empty parts.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
