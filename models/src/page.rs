use crate::limits::DEFAULT_PAGE_SIZE;

use serde::{Deserialize, Serialize};

/// One page of a paginated listing.
///
/// `total_count` comes from the `x-total-count` response header and counts
/// every item matching the query, not just this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn empty(page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            items: Vec::new(),
            total_count,
            page,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of pages needed to show `total_count` items, never below zero.
    pub fn total_pages(&self) -> u32 {
        let size = u64::from(self.page_size.max(1));
        self.total_count.div_ceil(size) as u32
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty(1, DEFAULT_PAGE_SIZE, 0)
    }
}
