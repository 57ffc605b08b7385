//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u64,
    /// The number of items per page.
    pub per_page: u64,
}

impl PageRequest {
    /// The default page number.
    pub const DEFAULT_PAGE: u64 = 1;
    /// The default page size.
    pub const DEFAULT_PER_PAGE: u64 = 6;

    /// Creates a new page request. Both values are clamped to at least 1.
    #[must_use]
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_PER_PAGE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results together with the totals reported by the source.
///
/// The totals are taken as reported: `total_pages` is not recomputed from
/// `total` and `per_page`, and `records.len()` may be smaller than `per_page`
/// after invalid records were dropped or observers filtered the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The page number.
    pub page: u64,
    /// The number of items per page.
    pub per_page: u64,
    /// The total number of items across all pages.
    pub total: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// The items on this page.
    pub records: Vec<T>,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(page: u64, per_page: u64, total: u64, total_pages: u64, records: Vec<T>) -> Self {
        Self {
            page,
            per_page,
            total,
            total_pages,
            records,
        }
    }

    /// Creates the empty page for a request: no records and zero totals.
    ///
    /// This is the single fallback value for every recovered failure.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(request.page, request.per_page, 0, 0, Vec::new())
    }

    /// Returns a new page with the same pagination numbers and different records.
    #[must_use]
    pub fn with_records<U>(&self, records: Vec<U>) -> Page<U> {
        Page {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            records,
        }
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
            records: self.records.into_iter().map(f).collect(),
        }
    }

    /// Returns true if the page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_to_one() {
        let req = PageRequest::new(0, 0);
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, 1);
    }

    #[test]
    fn test_page_request_default() {
        let req = PageRequest::default();
        assert_eq!(req, PageRequest::new(1, 6));
    }

    #[test]
    fn test_empty_page_uses_request() {
        let page: Page<i32> = Page::empty(PageRequest::new(3, 12));
        assert_eq!(page, Page::new(3, 12, 0, 0, vec![]));
        assert!(page.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_totals_are_not_recomputed() {
        // An inconsistent upstream report is kept as-is.
        let page = Page::new(1, 6, 12, 5, vec![1, 2]);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn test_with_records_keeps_totals() {
        let page = Page::new(2, 6, 12, 2, vec![1, 2, 3]);
        let revised = page.with_records(vec!["a"]);
        assert_eq!(revised.page, 2);
        assert_eq!(revised.per_page, 6);
        assert_eq!(revised.total, 12);
        assert_eq!(revised.total_pages, 2);
        assert_eq!(revised.records, vec!["a"]);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(1, 6, 3, 1, vec![1, 2, 3]);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.records, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
    }

    #[test]
    fn test_navigation() {
        let first = Page::new(1, 6, 12, 2, vec![0; 6]);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = Page::new(2, 6, 12, 2, vec![0; 6]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }
}
