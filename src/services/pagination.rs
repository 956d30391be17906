//! Page-number pagination for the article listing
//!
//! Fixed window of three articles per page, the size the listing view
//! renders. Out-of-range pages yield an empty page rather than clamping to
//! the nearest valid one.

use serde::Serialize;

/// Number of articles per listing page
pub const PAGE_SIZE: i64 = 3;

/// One page of results plus the metadata the listing view renders
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: i64,
    /// Total number of pages; at least 1 even with no items
    pub num_pages: i64,
    /// Total matching items across all pages
    pub total: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: i64, total: i64) -> Self {
        let num_pages = num_pages(total);
        Paginated {
            items,
            page,
            num_pages,
            total,
            has_next: page < num_pages,
            has_previous: page > 1,
        }
    }
}

/// Parse the `page` query-string value
///
/// Garbage and values below 1 fall back to page 1; a listing request never
/// fails on its pagination input.
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}

/// SQL OFFSET for a 1-based page number
pub fn offset_for(page: i64) -> i64 {
    (page - 1).saturating_mul(PAGE_SIZE)
}

/// Total pages for a result count; an empty result set still has one page
pub fn num_pages(total: i64) -> i64 {
    ((total + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_lenient() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-3")), 1);
        assert_eq!(parse_page(Some("2")), 2);
        assert_eq!(parse_page(Some(" 7 ")), 7);
    }

    #[test]
    fn test_offset_for_page() {
        assert_eq!(offset_for(1), 0);
        assert_eq!(offset_for(2), 3);
        assert_eq!(offset_for(5), 12);
        // Absurd page numbers must not overflow
        assert_eq!(offset_for(i64::MAX), i64::MAX);
    }

    #[test]
    fn test_num_pages_boundaries() {
        assert_eq!(num_pages(0), 1);
        assert_eq!(num_pages(1), 1);
        assert_eq!(num_pages(3), 1);
        assert_eq!(num_pages(4), 2);
        assert_eq!(num_pages(6), 2);
        assert_eq!(num_pages(7), 3);
    }

    #[test]
    fn test_paginated_flags() {
        let page = Paginated::new(vec![1, 2, 3], 1, 7);
        assert_eq!(page.num_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);

        let page = Paginated::new(vec![7], 3, 7);
        assert!(!page.has_next);
        assert!(page.has_previous);

        // Out-of-range request: empty items, no next page
        let page = Paginated::<i32>::new(vec![], 9, 7);
        assert!(page.items.is_empty());
        assert!(!page.has_next);
    }
}
