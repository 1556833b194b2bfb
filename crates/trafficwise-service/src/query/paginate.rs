//! Paginator.

use trafficwise_core::types::pagination::{clamp_page, total_pages};
use trafficwise_core::types::{Page, PageRequest};

/// Slice `records` into the page described by `request`.
///
/// Out-of-range page numbers clamp to the first or last page; an empty
/// input yields page 1 of 0.
pub fn paginate<R: Clone>(records: &[R], request: PageRequest) -> Page<R> {
    let page_size = request.page_size.max(1);
    let total_items = records.len() as u64;
    let current = clamp_page(request.page, total_pages(total_items, page_size));

    let start = usize::try_from((current - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
    let items = records
        .iter()
        .skip(start)
        .take(usize::try_from(page_size).unwrap_or(usize::MAX))
        .cloned()
        .collect();

    Page::new(items, current, page_size, total_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_is_partial() {
        let numbers: Vec<u32> = (1..=10).collect();
        let page = paginate(&numbers, PageRequest::new(3, 4));
        assert_eq!(page.items, vec![9, 10]);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let numbers: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&numbers, PageRequest::new(0, 4)).items, vec![1, 2, 3, 4]);
        assert_eq!(paginate(&numbers, PageRequest::new(-7, 4)).current_page, 1);
        assert_eq!(paginate(&numbers, PageRequest::new(99, 4)).items, vec![9, 10]);
    }

    #[test]
    fn test_empty_input() {
        let page = paginate::<u32>(&[], PageRequest::new(5, 8));
        assert!(page.items.is_empty());
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }
}
