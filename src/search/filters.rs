//! Catalog filters
//!
//! Two independent narrowing steps, applied before ordering:
//! - Category (exact label match)
//! - Free-text term (case-insensitive substring over the searchable fields)

use crate::core::skill::Skill;
use crate::normalize::fields::lowercase_fold;

/// Filters for narrowing the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Exact primary category label
    pub category: Option<String>,
    /// Search term; blank means no text filter
    pub term: String,
}

impl SearchFilters {
    /// Create new empty filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Set category filter
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = (!category.is_empty()).then_some(category);
        self
    }

    /// Set text filter
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = term.into();
        self
    }

    /// Check if any filters are set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.term.trim().is_empty()
    }

    /// Check if a skill passes both filters
    pub fn matches(&self, skill: &Skill) -> bool {
        self.matches_category(skill) && matches_term(skill, &lowercase_fold(self.term.trim()))
    }

    fn matches_category(&self, skill: &Skill) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| skill.category == category)
    }

    /// Apply both filters, keeping snapshot order.
    pub fn apply<'a>(&self, skills: &'a [Skill]) -> Vec<&'a Skill> {
        let needle = lowercase_fold(self.term.trim());
        skills
            .iter()
            .filter(|skill| self.matches_category(skill) && matches_term(skill, &needle))
            .collect()
    }
}

/// Fields a free-text term is matched against.
fn searchable_fields(skill: &Skill) -> impl Iterator<Item = &str> {
    [
        skill.skill_name.as_str(),
        skill.tagline.as_str(),
        skill.description.as_str(),
        skill.description_english.as_str(),
        skill.use_case.as_str(),
        skill.category.as_str(),
    ]
    .into_iter()
    .chain(skill.tags.iter().map(String::as_str))
}

/// Substring match of an already lower-cased `needle`. Empty matches all.
pub fn matches_term(skill: &Skill, needle: &str) -> bool {
    needle.is_empty()
        || searchable_fields(skill).any(|field| lowercase_fold(field).contains(needle))
}
