//! skilldex show - Show skill details

use chrono::Utc;
use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::skill::{Skill, SkillIndex};
use crate::error::{CatalogError, Result};
use crate::normalize::{RawValue, format_relative_time};
use crate::utils::format::{Locale, format_number};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Skill identifier, or its (percent-encoded) name
    pub skill: String,

    /// Include the full SKILL.md document and its translation
    #[arg(long)]
    pub full: bool,
}

pub async fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let skills = ctx.skills().await?;
    let skill = find_skill(&skills, &args.skill)?;

    if ctx.robot_mode {
        return emit_json(&robot_ok(skill));
    }
    emit_human(render_skill(skill, args.full, ctx.config.display.locale));
    Ok(())
}

/// Identifier lookup with a decoded-name fallback.
pub fn find_skill<'a>(skills: &'a [Skill], route_id: &str) -> Result<&'a Skill> {
    SkillIndex::build(skills)
        .find(route_id)
        .ok_or_else(|| CatalogError::SkillNotFound(route_id.to_string()))
}

fn render_skill(skill: &Skill, full: bool, locale: Locale) -> HumanLayout {
    let now = Utc::now();
    let relative = |value: &Option<String>| {
        value
            .as_ref()
            .map(|raw| format_relative_time(&RawValue::from(raw.as_str()), now, locale))
            .unwrap_or_default()
    };

    let mut layout = HumanLayout::new();
    layout.title(skill.display_name());
    for line in skill.tagline_lines() {
        layout.push_line(line.italic().to_string());
    }
    layout.blank();

    layout
        .kv("ID", &skill.identifier)
        .kv("Stars", &format_number(skill.star_count))
        .kv("Category", &skill.category)
        .kv("Tags", &skill.tags.join(", "))
        .kv("Repository", &skill.source_repository)
        .kv("Path", &skill.source_path)
        .kv("Download", &skill.download_url)
        .kv("Updated", &relative(&skill.updated_at))
        .kv("Created", &relative(&skill.created_at));

    let description = match locale {
        Locale::En if !skill.description_english.is_empty() => &skill.description_english,
        _ => &skill.description,
    };
    if !description.is_empty() {
        layout.section("Description").push_line(description.as_str());
    }
    if !skill.use_case.is_empty() {
        layout.section("Use case").push_line(skill.use_case.as_str());
    }
    if !skill.install_instructions.is_empty() {
        layout
            .section("Install")
            .push_line(skill.install_instructions.as_str());
    }
    if full {
        if !skill.document_content.is_empty() {
            layout
                .section("SKILL.md")
                .push_line(skill.document_content.as_str());
        }
        if !skill.document_translation.is_empty() {
            layout
                .section("SKILL.md (translation)")
                .push_line(skill.document_translation.as_str());
        }
    }
    layout
}
