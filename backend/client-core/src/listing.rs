//! Listing state shared by the thread and comment views.
//!
//! Page counts are derived from the `x-total-count` header; the helpers here
//! keep the current page valid as items are filtered, created and deleted.

use crate::error::validation::ValidationError;
use crate::validation::{validate_new_tag, validate_page};

use models::limits::DEFAULT_PAGE_SIZE;

use log::debug;

/// Pages needed for `total_count` items, `0` when there are none.
pub fn total_page_count(total_count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    total_count.div_ceil(size) as u32
}

/// Page holding the item appended by a create, given the count before it.
pub fn last_page_after_create(total_before: u64, page_size: u32) -> u32 {
    total_page_count(total_before + 1, page_size).max(1)
}

/// Page to show after deleting one item from `current_page`.
///
/// Steps back only when the deleted item was alone on the last page.
pub fn page_after_delete(current_page: u32, total_before: u64, page_size: u32) -> u32 {
    let pages_before = total_page_count(total_before, page_size);
    let pages_after = total_page_count(total_before.saturating_sub(1), page_size);

    if current_page > 1 && current_page == pages_before && pages_after < pages_before {
        current_page - 1
    } else {
        current_page
    }
}

/// Tag filter and page for the thread list.
///
/// Changing the filter always returns to the first page, since the old page
/// number may not exist for the new result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadListQuery {
    tags: Vec<String>,
    page: u32,
    page_size: u32,
}

impl Default for ThreadListQuery {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ThreadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[track_caller]
    pub fn add_tag(&mut self, tag: impl Into<String>) -> Result<(), ValidationError> {
        let tag = tag.into();
        validate_new_tag(&tag, &self.tags)?;

        debug!("Filtering threads by tag '{tag}'");
        self.tags.push(tag);
        self.page = 1;
        Ok(())
    }

    #[track_caller]
    pub fn set_page(&mut self, page: u32) -> Result<(), ValidationError> {
        validate_page(page)?;
        self.page = page;
        Ok(())
    }

    /// Value for the `tags` query parameter, `None` when unfiltered.
    pub fn tags_query(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(","))
        }
    }
}
