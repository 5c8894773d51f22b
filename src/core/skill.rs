//! The canonical skill entity and identifier lookup.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::normalize::fields::parse_date_text;
use crate::utils::format::split_tagline;

/// Name shown for a skill that has neither a name nor an identifier.
pub const UNNAMED_SKILL: &str = "未命名 skill";

/// A normalized catalog entry. Immutable once built by the record normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Routing key: row id, else percent-encoded name, else 1-based row position.
    pub identifier: String,
    pub skill_name: String,
    pub source_repository: String,
    pub source_path: String,
    pub download_url: String,
    pub star_count: u64,
    pub tagline: String,
    pub tags: Vec<String>,
    pub categories: Vec<String>,
    /// First entry of `categories`, else a label derived from the raw cell.
    pub category: String,
    pub description: String,
    pub description_english: String,
    pub use_case: String,
    pub document_content: String,
    pub document_translation: String,
    /// Serialized file tree, passed through untouched.
    pub file_tree_raw: String,
    pub install_instructions: String,
    /// Raw timestamp text; see [`Skill::updated_at_parsed`].
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Skill {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if !self.skill_name.is_empty() {
            &self.skill_name
        } else if !self.identifier.is_empty() {
            &self.identifier
        } else {
            UNNAMED_SKILL
        }
    }

    #[must_use]
    pub fn tagline_lines(&self) -> Vec<&str> {
        split_tagline(&self.tagline)
    }

    #[must_use]
    pub fn updated_at_parsed(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_date_text)
    }
}

/// Identifier → position lookup over a loaded collection.
///
/// Built in iteration order, so when two skills share an identifier the later
/// one wins.
#[derive(Debug)]
pub struct SkillIndex<'a> {
    skills: &'a [Skill],
    by_identifier: HashMap<&'a str, usize>,
}

impl<'a> SkillIndex<'a> {
    #[must_use]
    pub fn build(skills: &'a [Skill]) -> Self {
        let by_identifier = skills
            .iter()
            .enumerate()
            .map(|(position, skill)| (skill.identifier.as_str(), position))
            .collect();
        Self {
            skills,
            by_identifier,
        }
    }

    /// Resolve a route id: exact identifier, else the first skill whose name
    /// equals the percent-decoded id.
    #[must_use]
    pub fn find(&self, route_id: &str) -> Option<&'a Skill> {
        if let Some(&position) = self.by_identifier.get(route_id) {
            return self.skills.get(position);
        }
        let decoded = urlencoding::decode(route_id)
            .map_or_else(|_| route_id.to_string(), std::borrow::Cow::into_owned);
        self.skills.iter().find(|skill| skill.skill_name == decoded)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_identifier.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_identifier.is_empty()
    }
}
