//! Core skill types: the canonical entity and the category catalog.

pub mod categories;
pub mod skill;

pub use categories::{CATEGORIES, Category, CategoryCount, DEFAULT_CATEGORY, category_counts};
pub use skill::{Skill, SkillIndex};
