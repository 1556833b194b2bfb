//! Pagination types for record lists.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Request parameters for a page of a derived record list.
///
/// `page` is 1-based and deliberately signed: out-of-range requests are
/// clamped by the paginator instead of rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page number (1-based).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page (at least 1).
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request. A zero page size is raised to 1.
    pub fn new(page: i64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    /// The first page at the given size.
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of a filtered, sorted record list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Page actually served (1-based, after clamping).
    pub current_page: u64,
    /// Number of items per page.
    pub page_size: u64,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages (`ceil(total_items / page_size)`).
    pub total_pages: u64,
    /// Whether there is a next page.
    pub has_next: bool,
    /// Whether there is a previous page.
    pub has_previous: bool,
}

impl<T> Page<T> {
    /// Assemble a page from its already-sliced items.
    pub fn new(items: Vec<T>, current_page: u64, page_size: u64, total_items: u64) -> Self {
        let total_pages = total_pages(total_items, page_size);
        Self {
            items,
            current_page,
            page_size,
            total_items,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }

    /// Transform the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Number of pages needed for `total_items` at `page_size` per page.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `1..=max(total_pages, 1)`.
pub fn clamp_page(requested: i64, total_pages: u64) -> u64 {
    let last = total_pages.max(1);
    if requested < 1 {
        1
    } else {
        (requested as u64).min(last)
    }
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
