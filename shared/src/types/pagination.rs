//! Pagination request parameters and page metadata

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Pagination parameters taken from the query string.
///
/// Pages are 1-based. Out-of-range values are clamped rather than
/// rejected so a sloppy client still gets a sensible page.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,

    #[serde(default = "default_page_size", rename = "pageSize")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Page number clamped to at least 1.
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Page size clamped to the 1..=100 range.
    pub fn page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for a SQL `LIMIT ... OFFSET ...` clause.
    pub fn offset_i64(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.page_size())
    }

    /// Row limit for a SQL `LIMIT` clause.
    pub fn limit_i64(&self) -> i64 {
        i64::from(self.page_size())
    }
}

/// Page metadata returned alongside a page of results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PageMeta {
    /// Derive page metadata from the request parameters and the total
    /// row count reported by the repository.
    pub fn new(pagination: &Pagination, total_count: u64) -> Self {
        let page = pagination.page();
        let page_size = pagination.page_size();
        let total_pages = total_count.div_ceil(u64::from(page_size)) as u32;

        Self {
            page,
            page_size,
            total_count,
            total_pages,
            has_next: page < total_pages,
            has_previous: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_zero_page_and_oversized_page_size() {
        let p = Pagination::new(0, 500);
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_size(), 100);
        assert_eq!(p.offset_i64(), 0);
    }

    #[test]
    fn computes_offset_from_page() {
        let p = Pagination::new(3, 25);
        assert_eq!(p.offset_i64(), 50);
        assert_eq!(p.limit_i64(), 25);
    }

    #[test]
    fn page_meta_rounds_total_pages_up() {
        let meta = PageMeta::new(&Pagination::new(1, 10), 25);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next);
        assert!(!meta.has_previous);
    }

    #[test]
    fn page_meta_on_last_page() {
        let meta = PageMeta::new(&Pagination::new(3, 10), 25);
        assert!(!meta.has_next);
        assert!(meta.has_previous);
    }

    #[test]
    fn page_meta_for_empty_result() {
        let meta = PageMeta::new(&Pagination::default(), 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_previous);
    }
}
