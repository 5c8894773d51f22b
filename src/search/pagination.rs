//! Page arithmetic shared by the query engine and the CLI pager.

use serde::Serialize;

/// Window size at or below which every page number is listed.
const FULL_WINDOW: usize = 6;

/// Position of one page within a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Clamped 1-based page number.
    pub number: usize,
    /// Total pages; at least 1 even with zero matches.
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

impl Page {
    /// Clamp `requested` into `[1, total_pages]` for `total_items` split into
    /// pages of `page_size` and compute the slice bounds.
    #[must_use]
    pub fn clamp(requested: usize, total_items: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        let number = requested.clamp(1, total_pages);
        let start = ((number - 1) * page_size).min(total_items);
        let end = (start + page_size).min(total_items);
        Self {
            number,
            total_pages,
            start,
            end,
        }
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Page numbers to offer in a pager: all of them for short result sets,
/// otherwise the first, the last and the neighbours of `current`.
#[must_use]
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages <= FULL_WINDOW {
        return (1..=total_pages).collect();
    }
    let mut pages: Vec<usize> = [
        1,
        total_pages,
        current.saturating_sub(1),
        current,
        current + 1,
    ]
    .into_iter()
    .filter(|page| (1..=total_pages).contains(page))
    .collect();
    pages.sort_unstable();
    pages.dedup();
    pages
}
