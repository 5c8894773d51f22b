//! skilldex categories - Category catalog with per-category counts

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::categories::{CategoryCount, category_counts};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Hide categories without any skills
    #[arg(long)]
    pub non_empty: bool,
}

pub async fn run(ctx: &AppContext, args: &CategoriesArgs) -> Result<()> {
    let skills = ctx.skills().await?;
    let mut counts = category_counts(&skills);
    if args.non_empty {
        counts.retain(|entry| entry.count > 0);
    }

    if ctx.robot_mode {
        return emit_json(&robot_ok(counts));
    }
    emit_human(render_counts(&counts, skills.len()));
    Ok(())
}

fn render_counts(counts: &[CategoryCount], total: usize) -> HumanLayout {
    let mut layout = HumanLayout::new();
    layout.title(&format!("Categories ({total} skills)"));
    for entry in counts {
        layout.push_line(format!(
            "{:>5}  {}  {}",
            entry.count,
            entry.category.label.bold(),
            entry.category.hint.dimmed()
        ));
    }
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::categories::CATEGORIES;

    #[test]
    fn render_includes_every_entry() {
        colored::control::set_override(false);
        let counts: Vec<CategoryCount> = CATEGORIES
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                count: 2,
            })
            .collect();
        let text = render_counts(&counts, 30).build();
        assert!(text.starts_with("Categories (30 skills)"));
        for category in &CATEGORIES {
            assert!(text.contains(category.label));
        }
    }
}
