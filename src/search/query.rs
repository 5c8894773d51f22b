//! Query requests and sort ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::skill::Skill;
use crate::search::filters::SearchFilters;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    Latest,
    /// Least recently updated first.
    Oldest,
    /// Most stars first.
    Stars,
}

impl SortKey {
    pub const ALL: [Self; 3] = [Self::Latest, Self::Oldest, Self::Stars];

    /// Lenient parse: anything unrecognized means [`SortKey::Latest`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
            Self::Stars => "stars",
        }
    }

    /// Stable in-place sort of `skills` by this key.
    pub fn sort(self, skills: &mut [&Skill]) {
        match self {
            Self::Stars => skills.sort_by(|a, b| b.star_count.cmp(&a.star_count)),
            Self::Latest => skills.sort_by(|a, b| updated_millis(b).cmp(&updated_millis(a))),
            Self::Oldest => skills.sort_by(|a, b| updated_millis(a).cmp(&updated_millis(b))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            "stars" => Ok(Self::Stars),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Unparseable or missing update times sort as the epoch origin.
fn updated_millis(skill: &Skill) -> i64 {
    skill
        .updated_at_parsed()
        .map_or(0, |updated| updated.timestamp_millis())
}

/// A catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub term: String,
    pub category: Option<String>,
    pub sort: SortKey,
    /// Requested 1-based page; clamped when the query runs.
    pub page: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: String::new(),
            category: None,
            sort: SortKey::Latest,
            page: 1,
        }
    }
}

impl SearchQuery {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Build a query from raw request parameters (`q`, `category`, `page`,
    /// `sort`). Never fails: a missing or non-numeric page is page 1 and an
    /// unknown sort is `latest`.
    #[must_use]
    pub fn from_params(
        term: Option<&str>,
        category: Option<&str>,
        page: Option<&str>,
        sort: Option<&str>,
    ) -> Self {
        Self::new(term.unwrap_or_default())
            .with_category(category.unwrap_or_default())
            .with_page(parse_page(page.unwrap_or_default()))
            .with_sort(sort.map(SortKey::parse_lenient).unwrap_or_default())
    }

    #[must_use]
    pub fn filters(&self) -> SearchFilters {
        let filters = SearchFilters::new().with_term(self.term.clone());
        match &self.category {
            Some(category) => filters.with_category(category.clone()),
            None => filters,
        }
    }
}

/// Leading-integer page parse; anything below 1 is page 1.
///
/// Digit runs too large for `usize` saturate so the engine clamps them to the
/// last page.
#[must_use]
pub fn parse_page(raw: &str) -> usize {
    let trimmed = raw.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(trimmed.len(), |(idx, _)| idx);
    let digits = &trimmed[..digits_end];
    if digits.is_empty() {
        return 1;
    }
    digits.parse::<usize>().map_or(usize::MAX, |page| page.max(1))
}
