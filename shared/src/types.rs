//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters for report requests
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
        }
    }
}

impl Pagination {
    /// Row offset for the current page
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }
}

/// Pagination metadata returned alongside report data
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub pages: u32,
}

impl PaginationMeta {
    /// Metadata for an empty result set
    pub fn empty() -> Self {
        Self {
            total: 0,
            page: 1,
            page_size: Pagination::default().page_size,
            pages: 1,
        }
    }

    /// Compute metadata for a total row count
    ///
    /// A result set always has at least one page so the pager stays
    /// renderable when nothing matches.
    pub fn for_total(total: u64, pagination: Pagination) -> Self {
        let page_size = pagination.page_size.max(1);
        let pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(page_size)) as u32
        };
        Self {
            total,
            page: pagination.page.max(1),
            page_size,
            pages,
        }
    }
}
