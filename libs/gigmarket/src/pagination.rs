//! Page-number pagination for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Client-supplied page selection (1-based).
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PageQuery {
    /// Resolve the effective page/page_size against server defaults.
    pub fn resolve(self, default_size: u64, max_size: u64) -> (u64, u64) {
        let page = self.page.unwrap_or(1).max(1);
        let size = self.page_size.unwrap_or(default_size).clamp(1, max_size);
        (page, size)
    }
}

/// One page of results plus enough metadata to iterate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    /// Total number of matching rows.
    pub count: u64,
    /// 1-based page index served.
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: u64, page: u64, page_size: u64, results: Vec<T>) -> Self {
        let total_pages = if count == 0 {
            0
        } else {
            count.div_ceil(page_size)
        };
        Self {
            count,
            page,
            page_size,
            total_pages,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_applies_defaults_and_caps() {
        let q = PageQuery::default();
        assert_eq!(q.resolve(10, 100), (1, 10));

        let q = PageQuery {
            page: Some(0),
            page_size: Some(500),
        };
        assert_eq!(q.resolve(10, 100), (1, 100));

        let q = PageQuery {
            page: Some(3),
            page_size: Some(25),
        };
        assert_eq!(q.resolve(10, 100), (3, 25));
    }

    #[test]
    fn total_pages_rounds_up() {
        let page: Page<u8> = Page::new(21, 1, 10, vec![]);
        assert_eq!(page.total_pages, 3);

        let empty: Page<u8> = Page::new(0, 1, 10, vec![]);
        assert_eq!(empty.total_pages, 0);
    }
}
