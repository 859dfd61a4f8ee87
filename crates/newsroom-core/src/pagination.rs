//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
///
/// Page numbers are 1-based. Deserialized values are clamped like
/// [`PageRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPageRequest")]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page_number: usize,
    /// The number of items per page.
    pub page_size: usize,
}

#[derive(Deserialize)]
struct RawPageRequest {
    #[serde(default = "first_page")]
    page_number: usize,
    #[serde(default = "default_size")]
    page_size: usize,
}

const fn first_page() -> usize {
    1
}

const fn default_size() -> usize {
    PageRequest::DEFAULT_SIZE
}

impl From<RawPageRequest> for PageRequest {
    fn from(raw: RawPageRequest) -> Self {
        Self::new(raw.page_number, raw.page_size)
    }
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 10;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request, clamping out-of-range values.
    #[must_use]
    pub fn new(page_number: usize, page_size: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_SIZE)
    }

    /// Returns the number of items to skip, saturating for page numbers
    /// far past the end.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.page_number.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Returns the number of items to take.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.page_size
    }

    /// Cuts one page out of an already filtered, ordered sequence.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total_records = items.len() as u64;
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.limit())
            .collect();
        Page::new(items, self.page_number, self.page_size, total_records)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The current page number (1-indexed).
    pub page_number: usize,
    /// The number of items per page.
    pub page_size: usize,
    /// The total number of matching items across all pages.
    pub total_records: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: Vec<T>, page_number: usize, page_size: usize, total_records: u64) -> Self {
        let total_pages = if page_size > 0 {
            total_records.div_ceil(page_size as u64)
        } else {
            0
        };

        Self {
            items,
            page_number,
            page_size,
            total_records,
            total_pages,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request.page_number, request.page_size, 0)
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_records: self.total_records,
            total_pages: self.total_pages,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        (self.page_number as u64) < self.total_pages
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
