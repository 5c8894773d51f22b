//! Query engine over the loaded catalog.
//!
//! A query runs four steps in a fixed order over the immutable collection:
//!
//! ```text
//!   category filter ──▶ term filter ──▶ stable sort ──▶ paginate
//! ```
//!
//! The engine borrows the collection and returns borrowed views; it never
//! clones or mutates skills.

pub mod filters;
pub mod pagination;
pub mod query;

use serde::Serialize;
use tracing::debug;

use crate::config::DEFAULT_PAGE_SIZE;
use crate::core::skill::Skill;

pub use filters::{SearchFilters, matches_term};
pub use pagination::{Page, page_window};
pub use query::{SearchQuery, SortKey, parse_page};

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults<'a> {
    pub skills: Vec<&'a Skill>,
    /// Clamped 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl SearchResults<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    /// Page numbers to show in a pager for this result.
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        page_window(self.page, self.total_pages)
    }
}

/// Runs [`SearchQuery`]s with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryEngine {
    page_size: usize,
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryEngine {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filter, sort and paginate `skills`. Never fails.
    #[must_use]
    pub fn run<'a>(&self, skills: &'a [Skill], query: &SearchQuery) -> SearchResults<'a> {
        let mut matches = query.filters().apply(skills);
        query.sort.sort(&mut matches);

        let total_matches = matches.len();
        let page = Page::clamp(query.page, total_matches, self.page_size);
        debug!(
            term = %query.term,
            category = query.category.as_deref().unwrap_or(""),
            sort = %query.sort,
            total_matches,
            page = page.number,
            "query executed"
        );

        matches.truncate(page.end);
        matches.drain(..page.start);
        SearchResults {
            skills: matches,
            page: page.number,
            page_size: self.page_size,
            total_matches,
            total_pages: page.total_pages,
            has_previous: page.has_previous(),
            has_next: page.has_next(),
        }
    }
}
