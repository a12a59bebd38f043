//! Page windowing shared by the list screens.

use serde::Serialize;

/// Page size used by the admin tables.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Offset of the first item on this page. Page 0 is clamped to 1.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.per_page
    }
}

/// One page of results together with the figures the table footer shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    /// Total page count.
    pub pages: usize,
    /// Total matching items across all pages.
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, pages: usize, total: usize) -> Self {
        Self {
            items,
            page,
            pages,
            total,
        }
    }

    /// Wraps a full page slice computed from a total count and a page size.
    pub fn from_total(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        Self::new(items, page.max(1), total.div_ceil(per_page.max(1)), total)
    }
}
