//! List view state: the filter, sort, and page a console list is showing.

use serde::{Deserialize, Serialize};

use trafficwise_core::traits::Record;
use trafficwise_core::types::{FilterSpec, Page, PageRequest, SortField};

use super::{filter_records, paginate, sort_records};
use crate::store::RecordStore;

/// The query state of one entity list.
///
/// Changing what is shown (filter, sort, page size) always returns to
/// page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    filter: FilterSpec,
    sort: Option<SortField>,
    page: i64,
    page_size: u64,
}

impl ListView {
    /// A view on page 1 with no filter or sort.
    pub fn new(page_size: u64) -> Self {
        Self {
            filter: FilterSpec::default(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// The active filter.
    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// The active sort, if any.
    pub fn sort(&self) -> Option<&SortField> {
        self.sort.as_ref()
    }

    /// The requested page number (not yet clamped).
    pub fn page(&self) -> i64 {
        self.page
    }

    /// Records per page.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Replace the filter.
    pub fn set_filter(&mut self, filter: FilterSpec) {
        self.filter = filter;
        self.page = 1;
    }

    /// Apply a fixed sort.
    pub fn set_sort(&mut self, sort: Option<SortField>) {
        self.sort = sort;
        self.page = 1;
    }

    /// React to a click on a column header.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = SortField::toggled(self.sort.as_ref(), field);
        self.set_sort(Some(next));
    }

    /// Change the page size.
    pub fn set_page_size(&mut self, page_size: u64) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Jump to a page. Out-of-range values clamp when rendered.
    pub fn go_to(&mut self, page: i64) {
        self.page = page;
    }

    /// Advance one page if `last_rendered` has a next page.
    pub fn next_page<R>(&mut self, last_rendered: &Page<R>) {
        if last_rendered.has_next {
            self.page = last_rendered.current_page as i64 + 1;
        }
    }

    /// Go back one page if `last_rendered` has a previous page.
    pub fn previous_page<R>(&mut self, last_rendered: &Page<R>) {
        if last_rendered.has_previous {
            self.page = last_rendered.current_page as i64 - 1;
        }
    }

    /// Run filter, sort, and paginate over a store snapshot.
    pub fn render<R: Record>(&self, store: &RecordStore<R>) -> Page<R> {
        let filtered = filter_records(store.as_slice(), &self.filter);
        let sorted = match &self.sort {
            Some(sort) => sort_records(filtered, sort),
            None => filtered,
        };
        paginate(&sorted, PageRequest::new(self.page, self.page_size))
    }
}

impl Default for ListView {
    fn default() -> Self {
        Self::new(PageRequest::default().page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficwise_core::types::SortDirection;

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = ListView::new(8);
        view.go_to(3);
        view.set_filter(FilterSpec::new().with_text("main"));
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn test_toggle_sort_flips_then_resets() {
        let mut view = ListView::new(8);
        view.toggle_sort("severity");
        assert_eq!(view.sort().map(|s| s.direction), Some(SortDirection::Asc));
        view.go_to(2);
        view.toggle_sort("severity");
        assert_eq!(view.sort().map(|s| s.direction), Some(SortDirection::Desc));
        assert_eq!(view.page(), 1);
        view.toggle_sort("reportedAt");
        assert_eq!(
            view.sort(),
            Some(&SortField::asc("reportedAt"))
        );
    }

    #[test]
    fn test_page_size_zero_raised() {
        let mut view = ListView::new(8);
        view.set_page_size(0);
        assert_eq!(view.page_size(), 1);
    }
}
