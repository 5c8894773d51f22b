//! skilldex search - Filter, sort and page through the catalog

use chrono::Utc;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::normalize::{RawValue, format_relative_time};
use crate::search::{SearchQuery, SearchResults};
use crate::utils::format::{Locale, format_number, truncate_string};

/// Characters of tagline shown per result.
const TAGLINE_WIDTH: usize = 96;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text matched against name, tagline, descriptions, use case, category and tags
    pub query: Option<String>,

    /// Exact category label (see `skilldex categories`)
    #[arg(long, short)]
    pub category: Option<String>,

    /// Sort order: latest, oldest, stars (unknown values mean latest)
    #[arg(long, short, default_value = "latest")]
    pub sort: String,

    /// 1-based page number; out-of-range pages are clamped
    #[arg(long, short, default_value = "1")]
    pub page: String,
}

impl SearchArgs {
    #[must_use]
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery::from_params(
            self.query.as_deref(),
            self.category.as_deref(),
            Some(&self.page),
            Some(&self.sort),
        )
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a SearchQuery,
    #[serde(flatten)]
    results: &'a SearchResults<'a>,
    page_numbers: Vec<usize>,
}

pub async fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let skills = ctx.skills().await?;
    let query = args.to_query();
    let results = ctx.engine.run(&skills, &query);

    if ctx.robot_mode {
        let output = SearchOutput {
            query: &query,
            page_numbers: results.page_numbers(),
            results: &results,
        };
        return emit_json(&robot_ok(output));
    }

    emit_human(render_results(&query, &results, ctx.config.display.locale));
    Ok(())
}

fn render_results(query: &SearchQuery, results: &SearchResults<'_>, locale: Locale) -> HumanLayout {
    let mut layout = HumanLayout::new();
    if results.is_empty() {
        layout.push_line(no_results_message(query, locale));
        return layout;
    }

    let now = Utc::now();
    for skill in &results.skills {
        let updated = format_relative_time(&RawValue::from(skill.updated_at.clone()), now, locale);
        layout.push_line(format!(
            "{} {} {}",
            skill.display_name().bold(),
            format!("★ {}", format_number(skill.star_count)).yellow(),
            skill.category.dimmed()
        ));
        layout.push_line(format!("  {}  {}", skill.identifier.cyan(), updated.dimmed()));
        if let Some(first) = skill.tagline_lines().first() {
            layout.push_line(format!("  {}", truncate_string(first, TAGLINE_WIDTH)));
        }
        layout.blank();
    }

    let mut pager = Vec::new();
    if results.has_previous {
        pager.push("‹".to_string());
    }
    pager.extend(results.page_numbers().iter().map(|page| {
        if *page == results.page {
            format!("[{page}]").bold().to_string()
        } else {
            page.to_string()
        }
    }));
    if results.has_next {
        pager.push("›".to_string());
    }
    let pages = pager.join(" ");
    layout.push_line(format!(
        "{} · {pages}",
        format!("{} matches", results.total_matches).dimmed()
    ));
    layout
}

fn no_results_message(query: &SearchQuery, locale: Locale) -> String {
    match locale {
        Locale::ZhCn if query.term.is_empty() => "没有找到 skill".to_string(),
        Locale::ZhCn => format!("没有找到与“{}”相关的 skill", query.term),
        Locale::En if query.term.is_empty() => "No skills found".to_string(),
        Locale::En => format!("No skills match \"{}\"", query.term),
    }
}
